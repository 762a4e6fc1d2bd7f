pub mod chart_service;
pub mod ledger_service;
pub mod risk_engine;
