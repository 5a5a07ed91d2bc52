//! Route-level tests driving the axum router against a fixture store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tower::ServiceExt;

use bank_dashboard::config::CoverageTarget;
use bank_dashboard::coverage::Holding;
use bank_dashboard::error::Result as StoreResult;
use bank_dashboard::models::{ClientRow, LoanDetailRow};
use bank_dashboard::{create_router, templates, AppState, BankStore, DashboardError};

#[derive(Default)]
struct FixtureStore {
    clients: Vec<ClientRow>,
    loans: Vec<LoanDetailRow>,
    total: Option<Decimal>,
    branch_ids: Vec<i32>,
    holdings: Vec<Holding>,
}

#[async_trait]
impl BankStore for FixtureStore {
    async fn fetch_clients(&self) -> StoreResult<Vec<ClientRow>> {
        Ok(self.clients.clone())
    }

    async fn fetch_loan_details(&self) -> StoreResult<Vec<LoanDetailRow>> {
        Ok(self.loans.clone())
    }

    async fn loan_total(&self) -> StoreResult<Option<Decimal>> {
        Ok(self.total)
    }

    async fn branch_ids(&self, _branch: &str, _city: &str) -> StoreResult<Vec<i32>> {
        Ok(self.branch_ids.clone())
    }

    async fn branch_holdings(&self, _branch: &str, _city: &str) -> StoreResult<Vec<Holding>> {
        Ok(self.holdings.clone())
    }
}

enum Failure {
    Unavailable,
    Query,
}

struct FailingStore {
    failure: Failure,
}

impl FailingStore {
    fn error(&self) -> DashboardError {
        match self.failure {
            Failure::Unavailable => DashboardError::from(sqlx::Error::PoolClosed),
            Failure::Query => DashboardError::from(sqlx::Error::RowNotFound),
        }
    }
}

#[async_trait]
impl BankStore for FailingStore {
    async fn fetch_clients(&self) -> StoreResult<Vec<ClientRow>> {
        Err(self.error())
    }

    async fn fetch_loan_details(&self) -> StoreResult<Vec<LoanDetailRow>> {
        Err(self.error())
    }

    async fn loan_total(&self) -> StoreResult<Option<Decimal>> {
        Err(self.error())
    }

    async fn branch_ids(&self, _branch: &str, _city: &str) -> StoreResult<Vec<i32>> {
        Err(self.error())
    }

    async fn branch_holdings(&self, _branch: &str, _city: &str) -> StoreResult<Vec<Holding>> {
        Err(self.error())
    }
}

fn app_with(store: impl BankStore + 'static) -> axum::Router {
    let state = AppState {
        store: Arc::new(store),
        templates: Arc::new(templates::build_registry().unwrap()),
        coverage: CoverageTarget {
            branch: "Agência Brooklyn".to_string(),
            city: "Nova Iorque".to_string(),
        },
    };
    create_router(state)
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

fn client(name: &str, city: &str, address: &str) -> ClientRow {
    ClientRow {
        name: name.to_string(),
        city: city.to_string(),
        address: address.to_string(),
    }
}

fn loan(number: i32, date: &str, amount: &str, client: &str, account: Option<&str>) -> LoanDetailRow {
    LoanDetailRow {
        loan_number: number,
        date: date.parse::<NaiveDate>().unwrap(),
        amount: amount.parse::<Decimal>().unwrap(),
        client: client.to_string(),
        account: account.map(String::from),
    }
}

#[tokio::test]
async fn index_and_health_respond() {
    let app = app_with(FixtureStore::default());

    let response = get(app.clone(), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    assert_eq!(body, br#"{"status":"ok"}"#);
}

#[tokio::test]
async fn clients_view_renders_neighborhood_groups() {
    let store = FixtureStore {
        clients: vec![
            client("Carla", "Rio", "Rua A, Botafogo"),
            client("Ana", "Rio", "Rua B, Botafogo"),
            client("Bruno", "Manaus", "endereço ruim"),
        ],
        ..Default::default()
    };

    let response = get(app_with(store), "/clientes").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("Botafogo"));
    assert!(body.contains("Ana, Carla"));
    assert!(body.contains("Bairro não identificado"));
}

#[tokio::test]
async fn loan_report_is_a_pdf_attachment_named_for_today() {
    let store = FixtureStore {
        loans: vec![
            loan(1, "2024-05-02", "100.00", "Ana", Some("C-1")),
            loan(2, "2024-05-10", "250.50", "Bruno", None),
        ],
        ..Default::default()
    };

    let response = get(app_with(store), "/relatorio-emprestimos").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );

    let expected = format!(
        "attachment; filename=\"relatorio_emprestimos_{}.pdf\"",
        Local::now().format("%Y%m%d")
    );
    assert_eq!(response.headers()[header::CONTENT_DISPOSITION], &expected);

    let body = body_bytes(response).await;
    assert!(!body.is_empty());
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn loan_total_shows_exact_sum() {
    let store = FixtureStore {
        total: Some("350.50".parse().unwrap()),
        ..Default::default()
    };

    let response = get(app_with(store), "/total-emprestimos").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("R$ 350.50"));
}

#[tokio::test]
async fn loan_total_is_blank_without_loans() {
    // SUM over zero rows is NULL, passed through rather than coerced to 0
    let response = get(app_with(FixtureStore::default()), "/total-emprestimos").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!body.contains("R$"));
    assert!(!body.contains("0.00"));
}

#[tokio::test]
async fn coverage_view_lists_only_fully_covering_clients() {
    let store = FixtureStore {
        branch_ids: vec![1, 2, 3],
        holdings: vec![
            Holding { client: "Ana".to_string(), branch_id: 1 },
            Holding { client: "Ana".to_string(), branch_id: 2 },
            Holding { client: "Ana".to_string(), branch_id: 3 },
            Holding { client: "Bruno".to_string(), branch_id: 1 },
            Holding { client: "Bruno".to_string(), branch_id: 2 },
        ],
        ..Default::default()
    };

    let response = get(app_with(store), "/clientes-brooklyn").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.contains("Ana"));
    assert!(!body.contains("Bruno"));
}

#[tokio::test]
async fn coverage_view_is_empty_when_no_branches_match() {
    let store = FixtureStore {
        branch_ids: vec![],
        holdings: vec![Holding { client: "Ana".to_string(), branch_id: 1 }],
        ..Default::default()
    };

    let response = get(app_with(store), "/clientes-brooklyn").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!body.contains("Ana"));
    assert!(body.contains("Nenhum cliente"));
}

#[tokio::test]
async fn database_unavailable_maps_to_503() {
    let app = app_with(FailingStore { failure: Failure::Unavailable });
    let response = get(app, "/clientes").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn query_failure_maps_to_500() {
    let app = app_with(FailingStore { failure: Failure::Query });
    let response = get(app, "/total-emprestimos").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
