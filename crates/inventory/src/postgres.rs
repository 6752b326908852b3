use std::time::Duration;

use async_trait::async_trait;
use common::Sku;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use tracing::info;

use crate::{InventoryError, NewStock, Result, StockFilter, StockRow, StockStore};

/// PostgreSQL-backed stock store over the `store_stock` table.
#[derive(Clone)]
pub struct PostgresStockStore {
    pool: PgPool,
}

impl PostgresStockStore {
    /// Creates a new PostgreSQL stock store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and runs the migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.run_migrations().await?;
        info!("connected to inventory database");
        Ok(store)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_stock(row: PgRow) -> Result<StockRow> {
        Ok(StockRow {
            id: row.try_get("id")?,
            store_id: row.try_get("store_id")?,
            sku: Sku::new(row.try_get::<String, _>("sku")?),
            available: row.try_get("available")?,
            reserved: row.try_get("reserved")?,
        })
    }
}

#[async_trait]
impl StockStore for PostgresStockStore {
    async fn seed(&self, rows: &[NewStock]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for new in rows {
            let result = sqlx::query(
                r#"
                INSERT INTO store_stock (store_id, sku, available, reserved)
                VALUES ($1, $2, $3, 0)
                ON CONFLICT (store_id, sku) DO NOTHING
                "#,
            )
            .bind(&new.store_id)
            .bind(new.sku.as_str())
            .bind(new.available)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list(&self, filter: &StockFilter) -> Result<Vec<StockRow>> {
        let rows = sqlx::query(
            r#"
            SELECT id, store_id, sku, available, reserved
            FROM store_stock
            WHERE ($1::text IS NULL OR store_id = $1)
              AND ($2::text IS NULL OR sku = $2)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.store_value())
        .bind(filter.sku_value())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_stock).collect()
    }

    async fn reserve(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        // Check and update in one statement so concurrent reservations
        // serialize on the row lock.
        let row = sqlx::query(
            r#"
            UPDATE store_stock
            SET available = available - $3,
                reserved = reserved + $3,
                updated_at = NOW()
            WHERE store_id = $1 AND sku = $2 AND available >= $3
            RETURNING id, store_id, sku, available, reserved
            "#,
        )
        .bind(store_id)
        .bind(sku.as_str())
        .bind(qty)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_stock(row),
            None => Err(InventoryError::NoStock {
                store_id: store_id.to_string(),
                sku: sku.clone(),
            }),
        }
    }

    async fn confirm(&self, store_id: &str, sku: &Sku, qty: i64) -> Result<StockRow> {
        let row = sqlx::query(
            r#"
            UPDATE store_stock
            SET reserved = reserved - $3,
                updated_at = NOW()
            WHERE store_id = $1 AND sku = $2 AND reserved >= $3
            RETURNING id, store_id, sku, available, reserved
            "#,
        )
        .bind(store_id)
        .bind(sku.as_str())
        .bind(qty)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Self::row_to_stock(row),
            None => Err(InventoryError::NoReserved {
                store_id: store_id.to_string(),
                sku: sku.clone(),
            }),
        }
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
