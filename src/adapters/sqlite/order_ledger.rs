//! SQLite implementation of OrderLedger.
//!
//! Stores orders in a single `afdian_pay` table inside a WAL-journaled file.
//! The pool holds one connection and every operation runs under an async
//! mutex, so ledger access is strictly single-writer.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tokio::sync::Mutex;

use crate::config::DatabaseConfig;
use crate::domain::order::{format_major, OrderRecord};
use crate::ports::{LedgerError, OrderLedger};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS afdian_pay (
        order_no   TEXT PRIMARY KEY,
        amount     TEXT NOT NULL,
        notify_url TEXT NOT NULL,
        is_paid    BOOLEAN NOT NULL DEFAULT 0
    )
"#;

/// SQLite implementation of the OrderLedger port.
pub struct SqliteOrderLedger {
    pool: SqlitePool,
    guard: Mutex<()>,
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_no: String,
    amount: String,
    notify_url: String,
    is_paid: bool,
}

impl From<OrderRow> for OrderRecord {
    fn from(row: OrderRow) -> Self {
        OrderRecord {
            order_no: row.order_no,
            amount: row.amount,
            notify_url: row.notify_url,
            is_paid: row.is_paid,
        }
    }
}

impl SqliteOrderLedger {
    /// Opens (creating if missing) the ledger file described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, LedgerError> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| storage("Failed to open ledger", e))?;

        let ledger = Self::new(pool);
        ledger.ensure_schema().await?;
        tracing::info!(path = %config.path, "Order ledger ready");
        Ok(ledger)
    }

    /// Wraps an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            guard: Mutex::new(()),
        }
    }

    async fn ensure_schema(&self) -> Result<(), LedgerError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| storage("Failed to create ledger table", e))?;
        Ok(())
    }
}

fn storage(context: &str, e: sqlx::Error) -> LedgerError {
    LedgerError::Storage(format!("{}: {}", context, e))
}

#[async_trait]
impl OrderLedger for SqliteOrderLedger {
    async fn insert(
        &self,
        order_no: &str,
        amount_fen: i64,
        notify_url: &str,
    ) -> Result<(), LedgerError> {
        let _guard = self.guard.lock().await;
        self.ensure_schema().await?;

        sqlx::query("INSERT INTO afdian_pay (order_no, amount, notify_url, is_paid) VALUES (?, ?, ?, 0)")
            .bind(order_no)
            .bind(format_major(amount_fen))
            .bind(notify_url)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return LedgerError::Duplicate(order_no.to_string());
                    }
                }
                storage("Failed to insert order", e)
            })?;

        Ok(())
    }

    async fn find(&self, order_no: &str) -> Result<Option<OrderRecord>, LedgerError> {
        let _guard = self.guard.lock().await;
        self.ensure_schema().await?;

        let row: Option<OrderRow> = sqlx::query_as(
            "SELECT order_no, amount, notify_url, is_paid FROM afdian_pay WHERE order_no = ?",
        )
        .bind(order_no)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage("Failed to find order", e))?;

        Ok(row.map(OrderRecord::from))
    }

    async fn mark_paid(&self, order_no: &str) -> Result<(), LedgerError> {
        let _guard = self.guard.lock().await;
        self.ensure_schema().await?;

        let result = sqlx::query("UPDATE afdian_pay SET is_paid = 1 WHERE order_no = ?")
            .bind(order_no)
            .execute(&self.pool)
            .await
            .map_err(|e| storage("Failed to mark order paid", e))?;

        if result.rows_affected() == 0 {
            tracing::debug!(order_no, "mark_paid matched no order");
        }
        Ok(())
    }

    async fn is_paid(&self, order_no: &str) -> Result<Option<bool>, LedgerError> {
        let _guard = self.guard.lock().await;
        self.ensure_schema().await?;

        let paid: Option<bool> =
            sqlx::query_scalar("SELECT is_paid FROM afdian_pay WHERE order_no = ?")
                .bind(order_no)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| storage("Failed to read order status", e))?;

        Ok(paid)
    }
}
