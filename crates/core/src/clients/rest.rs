use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::{CreateReceipt, LedgerStore, LoanOracle, UpdateReceipt};
use crate::errors::CoreError;
use crate::models::entry::{EntryId, EntryPayload, LedgerEntry};
use crate::models::session::AuthToken;

/// REST client for the Loan Advisor backend.
///
/// Implements both collaborator seams against the HTTP+JSON API:
/// - `/api/profile/expenses` for the ledger (JSON reads, form-encoded
///   writes, matching what the backend parses)
/// - `/api/predict-loan-safety` for the prediction model (JSON)
///
/// Every request carries the bearer credential passed by the caller.
/// Cheap to clone: the inner connection pool is shared.
#[derive(Clone)]
pub struct RestApiClient {
    client: Client,
    base_url: String,
}

impl RestApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn expenses_url(&self) -> String {
        format!("{}/api/profile/expenses", self.base_url)
    }
}

// ── Backend wire types ──────────────────────────────────────────────

#[derive(Deserialize)]
struct CreateResponse {
    expense_id: String,
}

#[derive(Deserialize)]
struct UpdateResponse {
    updated_at: NaiveDateTime,
}

#[derive(Deserialize)]
struct PredictResponse {
    prediction: String,
}

/// Shape of the backend's failure bodies: `{"error": "..."}`
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct PredictRequest {
    total_income: f64,
    debt_to_income_ratio: f64,
}

/// Convert a non-success response into the matching `CoreError`,
/// surfacing the backend's error message when the body is parseable.
async fn failure(endpoint: &str, response: Response) -> CoreError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return CoreError::SessionExpired;
    }

    let message = match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("HTTP {status}")),
        Err(_) => format!("HTTP {status}"),
    };

    CoreError::Api {
        endpoint: endpoint.to_string(),
        message,
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LedgerStore for RestApiClient {
    fn name(&self) -> &str {
        "Loan Advisor API"
    }

    async fn list_entries(&self, token: &AuthToken) -> Result<Vec<LedgerEntry>, CoreError> {
        let url = self.expenses_url();
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(failure("list_entries", response).await);
        }

        response.json().await.map_err(|e| CoreError::Api {
            endpoint: "list_entries".into(),
            message: format!("Failed to parse entry list: {e}"),
        })
    }

    async fn create_entry(
        &self,
        token: &AuthToken,
        payload: &EntryPayload,
    ) -> Result<CreateReceipt, CoreError> {
        let url = self.expenses_url();
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .form(payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(failure("create_entry", response).await);
        }

        let body: CreateResponse = response.json().await.map_err(|e| CoreError::Api {
            endpoint: "create_entry".into(),
            message: format!("Failed to parse create receipt: {e}"),
        })?;

        // The backend does not echo the persisted timestamp on create,
        // so stamp it client-side.
        Ok(CreateReceipt {
            id: EntryId::new(body.expense_id),
            created_at: Utc::now().naive_utc(),
        })
    }

    async fn update_entry(
        &self,
        token: &AuthToken,
        id: &EntryId,
        payload: &EntryPayload,
    ) -> Result<UpdateReceipt, CoreError> {
        let url = format!("{}/{id}", self.expenses_url());
        debug!("PUT {url}");

        let response = self
            .client
            .put(&url)
            .bearer_auth(token.expose())
            .form(payload)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::EntryNotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(failure("update_entry", response).await);
        }

        let body: UpdateResponse = response.json().await.map_err(|e| CoreError::Api {
            endpoint: "update_entry".into(),
            message: format!("Failed to parse update receipt: {e}"),
        })?;

        Ok(UpdateReceipt {
            updated_at: body.updated_at,
        })
    }

    async fn delete_entry(&self, token: &AuthToken, id: &EntryId) -> Result<(), CoreError> {
        let url = format!("{}/{id}", self.expenses_url());
        debug!("DELETE {url}");

        let response = self
            .client
            .delete(&url)
            .bearer_auth(token.expose())
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::EntryNotFound(id.to_string()));
        }
        if !response.status().is_success() {
            return Err(failure("delete_entry", response).await);
        }

        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl LoanOracle for RestApiClient {
    fn name(&self) -> &str {
        "Loan Advisor API"
    }

    async fn predict_loan_safety(
        &self,
        token: &AuthToken,
        total_income: f64,
        debt_to_income_ratio: f64,
    ) -> Result<String, CoreError> {
        let url = format!("{}/api/predict-loan-safety", self.base_url);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(token.expose())
            .json(&PredictRequest {
                total_income,
                debt_to_income_ratio,
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(failure("predict_loan_safety", response).await);
        }

        let body: PredictResponse = response.json().await.map_err(|e| CoreError::Api {
            endpoint: "predict_loan_safety".into(),
            message: format!("Failed to parse prediction: {e}"),
        })?;

        Ok(body.prediction)
    }
}
