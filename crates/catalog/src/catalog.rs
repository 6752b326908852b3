use std::time::Duration;

use common::Money;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use tracing::{info, warn};

use crate::{Product, Result, mock_products};

const SELECT_PRODUCTS: &str = r#"
    SELECT id_producto::bigint AS id_producto,
           nom_producto,
           pre_producto::numeric AS pre_producto,
           cat_producto,
           imagen
    FROM productos
    ORDER BY id_producto
"#;

const PROBE_PRODUCTS: &str = r#"
    SELECT id_producto, nom_producto, pre_producto, cat_producto, imagen
    FROM productos
    LIMIT 1
"#;

/// Reads products from the `productos` table.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Checks that the table exists with the expected columns.
    pub async fn probe(&self) -> Result<()> {
        sqlx::query(PROBE_PRODUCTS).fetch_optional(&self.pool).await?;
        Ok(())
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(SELECT_PRODUCTS).fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_product).collect()
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: row.try_get("id_producto")?,
            name: row.try_get("nom_producto")?,
            price: Money::new(row.try_get("pre_producto")?),
            category: row.try_get("cat_producto")?,
            image: row.try_get("imagen")?,
        })
    }
}

/// Where the catalog's products come from.
#[derive(Clone)]
pub enum Catalog {
    Database(PostgresCatalog),
    Mock,
}

impl Catalog {
    /// Connects to `database_url` and probes the products table, falling back
    /// to the mock list when the URL is unset or either step fails.
    pub async fn connect(database_url: Option<&str>) -> Self {
        let Some(url) = database_url else {
            info!("no database configured, serving mock catalog");
            return Catalog::Mock;
        };

        let pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "catalog database unreachable, serving mock catalog");
                return Catalog::Mock;
            }
        };

        let catalog = PostgresCatalog::new(pool);
        match catalog.probe().await {
            Ok(()) => {
                info!("catalog reading from productos table");
                Catalog::Database(catalog)
            }
            Err(e) => {
                warn!(error = %e, "productos table not usable, serving mock catalog");
                Catalog::Mock
            }
        }
    }

    /// Lists the products of the active source.
    pub async fn products(&self) -> Result<Vec<Product>> {
        match self {
            Catalog::Database(db) => db.products().await,
            Catalog::Mock => Ok(mock_products()),
        }
    }

    /// `"ok"` when reading from the database, `"mock"` otherwise.
    pub fn status(&self) -> &'static str {
        match self {
            Catalog::Database(_) => "ok",
            Catalog::Mock => "mock",
        }
    }
}
