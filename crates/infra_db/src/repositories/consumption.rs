//! Consumption invoice repository
//!
//! Database access for the `consumption_invoices` table. The table carries a
//! UNIQUE (identifier, month, year) constraint, which is what makes
//! [`ConsumptionRepository::insert`] safe against concurrent creates.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::DatabaseError;

const SELECT_COLUMNS: &str = r#"
    invoice_id, identifier, month, year, volume_consumed, tariff_flag,
    has_sewage_service, billable_volume, tariff_rate, water_charge,
    flag_surcharge, sewage_fee, total, created_at
"#;

/// A stored invoice row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConsumptionRow {
    pub invoice_id: Uuid,
    pub identifier: String,
    pub month: i32,
    pub year: i32,
    pub volume_consumed: Decimal,
    pub tariff_flag: String,
    pub has_sewage_service: bool,
    pub billable_volume: Decimal,
    pub tariff_rate: Decimal,
    pub water_charge: Decimal,
    pub flag_surcharge: Decimal,
    pub sewage_fee: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Data for inserting a new invoice row
#[derive(Debug, Clone)]
pub struct NewConsumptionRow {
    pub invoice_id: Uuid,
    pub identifier: String,
    pub month: i32,
    pub year: i32,
    pub volume_consumed: Decimal,
    pub tariff_flag: String,
    pub has_sewage_service: bool,
    pub billable_volume: Decimal,
    pub tariff_rate: Decimal,
    pub water_charge: Decimal,
    pub flag_surcharge: Decimal,
    pub sewage_fee: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Repository for consumption invoices
#[derive(Debug, Clone)]
pub struct ConsumptionRepository {
    pool: PgPool,
}

impl ConsumptionRepository {
    /// Creates a new ConsumptionRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new invoice row inside a transaction
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` when a row with the same
    /// (identifier, month, year) already exists.
    #[instrument(skip(self, row), fields(identifier = %row.identifier, month = row.month, year = row.year))]
    pub async fn insert(&self, row: NewConsumptionRow) -> Result<ConsumptionRow, DatabaseError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        let sql = format!(
            r#"
            INSERT INTO consumption_invoices (
                invoice_id, identifier, month, year, volume_consumed, tariff_flag,
                has_sewage_service, billable_volume, tariff_rate, water_charge,
                flag_surcharge, sewage_fee, total, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        let stored = sqlx::query_as::<_, ConsumptionRow>(&sql)
            .bind(row.invoice_id)
            .bind(&row.identifier)
            .bind(row.month)
            .bind(row.year)
            .bind(row.volume_consumed)
            .bind(&row.tariff_flag)
            .bind(row.has_sewage_service)
            .bind(row.billable_volume)
            .bind(row.tariff_rate)
            .bind(row.water_charge)
            .bind(row.flag_surcharge)
            .bind(row.sewage_fee)
            .bind(row.total)
            .bind(row.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match DatabaseError::from(&e) {
                DatabaseError::DuplicateEntry(_) => DatabaseError::duplicate(
                    "Invoice",
                    "key",
                    format!("{}/{}/{}", row.identifier, row.month, row.year),
                ),
                other => other,
            })?;

        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        debug!(invoice_id = %stored.invoice_id, "Invoice row inserted");
        Ok(stored)
    }

    /// Finds the row for an exact (identifier, month, year)
    pub async fn find_by_key(
        &self,
        identifier: &str,
        month: i32,
        year: i32,
    ) -> Result<Option<ConsumptionRow>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM consumption_invoices WHERE identifier = $1 AND month = $2 AND year = $3",
            SELECT_COLUMNS
        );

        sqlx::query_as::<_, ConsumptionRow>(&sql)
            .bind(identifier)
            .bind(month)
            .bind(year)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Lists every row ordered by year, month, identifier
    pub async fn list(&self) -> Result<Vec<ConsumptionRow>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM consumption_invoices ORDER BY year, month, identifier",
            SELECT_COLUMNS
        );

        sqlx::query_as::<_, ConsumptionRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Deletes the row for a key, returning whether one existed
    pub async fn delete_by_key(
        &self,
        identifier: &str,
        month: i32,
        year: i32,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM consumption_invoices WHERE identifier = $1 AND month = $2 AND year = $3",
        )
        .bind(identifier)
        .bind(month)
        .bind(year)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from(&e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored rows
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM consumption_invoices")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from(&e))?;
        Ok(())
    }
}
