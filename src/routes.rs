//! HTTP surface: router construction and the five dashboard views.
//!
//! Every route is GET-only and side-effect-free against the store. Handlers
//! propagate `DashboardError`, which maps database-unavailable to 503 and
//! everything else to 500.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use handlebars::Handlebars;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::CoverageTarget;
use crate::error::DashboardError;
use crate::store::BankStore;
use crate::{address, coverage, pdf, report};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BankStore>,
    pub templates: Arc<Handlebars<'static>>,
    pub coverage: CoverageTarget,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/clientes", get(clients_by_neighborhood))
        .route("/relatorio-emprestimos", get(loan_report))
        .route("/total-emprestimos", get(loan_total))
        .route("/clientes-brooklyn", get(branch_coverage))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    Ok(Html(state.templates.render("index", &json!({}))?))
}

/// Clients grouped by city and neighborhood parsed out of the address field
async fn clients_by_neighborhood(
    State(state): State<AppState>,
) -> Result<Html<String>, DashboardError> {
    let clients = state.store.fetch_clients().await?;
    let groups = address::group_by_neighborhood(&clients);
    let page = state
        .templates
        .render("clientes", &json!({ "groups": groups }))?;
    Ok(Html(page))
}

/// Monthly loan report as a downloadable PDF
async fn loan_report(State(state): State<AppState>) -> Result<Response, DashboardError> {
    let loans = state.store.fetch_loan_details().await?;
    let rows = report::build_report(&loans);

    let generated_at = Local::now();
    let bytes = pdf::render_loan_report(&rows, generated_at)?;
    info!(rows = rows.len(), bytes = bytes.len(), "loan report generated");

    let filename = format!(
        "relatorio_emprestimos_{}.pdf",
        generated_at.format("%Y%m%d")
    );
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

/// Aggregate loan sum; the page stays blank when there are no loans
async fn loan_total(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let total = state.store.loan_total().await?;
    let page = state.templates.render(
        "total_emprestimos",
        &json!({ "total": total.map(report::format_money) }),
    )?;
    Ok(Html(page))
}

/// Clients holding an account at every branch row of the configured group
async fn branch_coverage(State(state): State<AppState>) -> Result<Html<String>, DashboardError> {
    let target = &state.coverage;
    let branch_ids = state.store.branch_ids(&target.branch, &target.city).await?;
    let holdings = state
        .store
        .branch_holdings(&target.branch, &target.city)
        .await?;

    let clients = coverage::clients_covering_all(&branch_ids, &holdings);
    let page = state.templates.render(
        "clientes_brooklyn",
        &json!({
            "branch": target.branch,
            "city": target.city,
            "clients": clients,
        }),
    )?;
    Ok(Html(page))
}
