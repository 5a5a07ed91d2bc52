//! Error taxonomy for the dashboard.
//!
//! Failures fall into two classes the HTTP layer cares about: the database
//! being unreachable (503) and everything else that goes wrong while serving
//! a request (500). The split happens in the `From<sqlx::Error>` conversion
//! so handlers only ever propagate with `?`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Main error type for the dashboard library
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("database unavailable: {0}")]
    DatabaseUnavailable(#[source] sqlx::Error),

    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),

    #[error("template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

impl From<sqlx::Error> for DashboardError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::DatabaseUnavailable(err),
            _ => Self::Query(err),
        }
    }
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(_) | Self::Template(_) | Self::Pdf(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!("request failed: {self}");
        (status, status.canonical_reason().unwrap_or("error").to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
