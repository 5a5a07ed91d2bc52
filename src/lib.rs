//! Read-only reporting dashboard over a relational banking schema.
//!
//! The dashboard runs a handful of analytical queries against PostgreSQL
//! (clients, accounts, loans, branches, depositors) and renders the results
//! as HTML pages or a generated PDF report. There is no write path; every
//! route is idempotent against the store.

pub mod address;
pub mod config;
pub mod coverage;
pub mod error;
pub mod models;
pub mod pdf;
pub mod report;
pub mod routes;
pub mod store;
pub mod templates;

pub use config::AppConfig;
pub use error::DashboardError;
pub use routes::{create_router, AppState};
pub use store::{BankStore, PgStore};
