//! Data access for the banking schema.
//!
//! `BankStore` is the seam between the HTTP handlers and PostgreSQL, so the
//! routes can be exercised against a fixture store in tests. `PgStore` is
//! the production implementation over a shared `PgPool`; every query checks
//! a connection out of the pool for its own duration, so connections are
//! returned on every exit path including failures.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::coverage::Holding;
use crate::error::Result;
use crate::models::{ClientRow, LoanDetailRow};

#[async_trait]
pub trait BankStore: Send + Sync {
    /// All clients with their city and free-text address
    async fn fetch_clients(&self) -> Result<Vec<ClientRow>>;

    /// Every loan joined through its borrower, with the client's deposit
    /// account when one exists (left join, so account may be absent)
    async fn fetch_loan_details(&self) -> Result<Vec<LoanDetailRow>>;

    /// Sum of all loan amounts; `None` when there are no loans
    async fn loan_total(&self) -> Result<Option<Decimal>>;

    /// Ids of the branch rows matching the (name, city) group filter
    async fn branch_ids(&self, branch: &str, city: &str) -> Result<Vec<i32>>;

    /// (client, branch id) pairs for accounts held at matching branches
    async fn branch_holdings(&self, branch: &str, city: &str) -> Result<Vec<Holding>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BankStore for PgStore {
    async fn fetch_clients(&self) -> Result<Vec<ClientRow>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT
                nome_cliente AS name,
                cidade_cliente AS city,
                endereco_cliente AS address
            FROM cliente
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn fetch_loan_details(&self) -> Result<Vec<LoanDetailRow>> {
        let rows = sqlx::query_as::<_, LoanDetailRow>(
            r#"
            SELECT
                e.num_empr AS loan_number,
                e.data_empr AS date,
                e.valor AS amount,
                cl.nome_cliente AS client,
                c.num_conta AS account
            FROM emprestimo e
            JOIN tomador t ON e.num_empr = t.num_empr
            JOIN cliente cl ON t.nome_cliente = cl.nome_cliente
            LEFT JOIN depositante d ON t.nome_cliente = d.nome_cliente
            LEFT JOIN conta c ON d.num_conta = c.num_conta
            ORDER BY e.data_empr, e.num_empr
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn loan_total(&self) -> Result<Option<Decimal>> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(valor) FROM emprestimo",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    async fn branch_ids(&self, branch: &str, city: &str) -> Result<Vec<i32>> {
        let ids = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT id_agencia
            FROM agencia
            WHERE nome_agencia = $1 AND cidade_agencia = $2
            "#,
        )
        .bind(branch)
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn branch_holdings(&self, branch: &str, city: &str) -> Result<Vec<Holding>> {
        let holdings = sqlx::query_as::<_, Holding>(
            r#"
            SELECT DISTINCT
                d.nome_cliente AS client,
                a.id_agencia AS branch_id
            FROM depositante d
            JOIN conta c ON d.num_conta = c.num_conta
            JOIN agencia a ON c.id_agencia = a.id_agencia
            WHERE a.nome_agencia = $1 AND a.cidade_agencia = $2
            "#,
        )
        .bind(branch)
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(holdings)
    }
}
