//! Row types fetched from the banking store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// One client row: name, city and the free-text address field
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub name: String,
    pub city: String,
    pub address: String,
}

/// Aggregated neighborhood group for the `/clientes` view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborhoodGroup {
    pub city: String,
    pub neighborhood: String,
    pub total: u64,
    /// Comma-joined client names, alphabetical
    pub clients: String,
}

/// One loan joined through its borrower to the client, with the client's
/// deposit account when one exists. A client with several deposit accounts
/// fans out into several rows, one per account.
#[derive(Debug, Clone, FromRow)]
pub struct LoanDetailRow {
    pub loan_number: i32,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub client: String,
    pub account: Option<String>,
}

/// One row of the monthly loan report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// Total loaned in the month
    pub total: Decimal,
    /// Largest single loan of the month
    pub largest: Decimal,
    pub loan_number: i32,
    pub client: String,
    pub account: Option<String>,
}
