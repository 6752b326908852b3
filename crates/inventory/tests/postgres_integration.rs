//! PostgreSQL integration tests
//!
//! These tests share one PostgreSQL container. Each test works on its own
//! store id so they can run in parallel.
//!
//! ```bash
//! cargo test -p inventory --test postgres_integration
//! ```

use std::sync::Arc;

use common::Sku;
use inventory::{
    InventoryError, InventoryService, NewStock, PostgresStockStore, StockFilter, StockStore,
};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresStockStore::new(pool.clone())
                .run_migrations()
                .await
                .unwrap();
            pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

async fn get_test_store() -> PostgresStockStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&info.connection_string)
        .await
        .unwrap();

    PostgresStockStore::new(pool)
}

fn sku(s: &str) -> Sku {
    Sku::new(s)
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = get_test_store().await;
    store.run_migrations().await.unwrap();
}

#[tokio::test]
async fn seed_ignores_duplicates() {
    let store = get_test_store().await;
    let rows = vec![
        NewStock::new("T-SEED", "SKU-001", 10),
        NewStock::new("T-SEED", "SKU-002", 5),
    ];

    assert_eq!(store.seed(&rows).await.unwrap(), 2);
    assert_eq!(store.seed(&rows).await.unwrap(), 0);

    let listed = store
        .list(&StockFilter::new().store("T-SEED"))
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].sku, sku("SKU-001"));
    assert_eq!(listed[0].available, 10);
    assert_eq!(listed[0].reserved, 0);
    assert!(listed[0].id < listed[1].id);
}

#[tokio::test]
async fn list_filters_by_store_and_sku() {
    let store = get_test_store().await;
    store
        .seed(&[
            NewStock::new("T-LIST-A", "SKU-LIST", 1),
            NewStock::new("T-LIST-B", "SKU-LIST", 2),
            NewStock::new("T-LIST-B", "SKU-OTHER", 3),
        ])
        .await
        .unwrap();

    let by_both = store
        .list(&StockFilter::new().store("T-LIST-B").sku("SKU-LIST"))
        .await
        .unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].available, 2);

    let by_sku = store
        .list(&StockFilter::new().sku("SKU-LIST"))
        .await
        .unwrap();
    assert_eq!(by_sku.len(), 2);
}

#[tokio::test]
async fn reserve_and_confirm() {
    let store = get_test_store().await;
    store
        .seed(&[NewStock::new("T-RES", "SKU-001", 10)])
        .await
        .unwrap();

    let row = store.reserve("T-RES", &sku("SKU-001"), 4).await.unwrap();
    assert_eq!((row.available, row.reserved), (6, 4));

    let row = store.confirm("T-RES", &sku("SKU-001"), 3).await.unwrap();
    assert_eq!((row.available, row.reserved), (6, 1));

    assert!(matches!(
        store.confirm("T-RES", &sku("SKU-001"), 2).await,
        Err(InventoryError::NoReserved { .. })
    ));
    assert!(matches!(
        store.reserve("T-RES", &sku("SKU-001"), 7).await,
        Err(InventoryError::NoStock { .. })
    ));
}

#[tokio::test]
async fn missing_row_is_no_stock() {
    let store = get_test_store().await;

    assert!(matches!(
        store.reserve("T-NONE", &sku("SKU-001"), 1).await,
        Err(InventoryError::NoStock { .. })
    ));
    assert!(matches!(
        store.confirm("T-NONE", &sku("SKU-001"), 1).await,
        Err(InventoryError::NoReserved { .. })
    ));
}

#[tokio::test]
async fn concurrent_reservations_never_oversell() {
    let store = get_test_store().await;
    store
        .seed(&[NewStock::new("T-CONC", "SKU-001", 10)])
        .await
        .unwrap();
    let service = InventoryService::new(store);

    let mut handles = Vec::new();
    for _ in 0..25 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.reserve("T-CONC", &Sku::new("SKU-001"), 1).await.is_ok()
        }));
    }

    let mut succeeded = 0;
    for handle in handles {
        if handle.await.unwrap() {
            succeeded += 1;
        }
    }
    assert_eq!(succeeded, 10);

    let rows = service
        .stock(&StockFilter::new().store("T-CONC"))
        .await
        .unwrap();
    assert_eq!((rows[0].available, rows[0].reserved), (0, 10));
}
