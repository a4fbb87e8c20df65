//! End-to-end coordination across independent SQLite databases
//!
//! Each resource is its own in-memory database (single-connection pool), so
//! the only thing tying writes together is the coordinator.

use std::sync::Arc;

use multitx_core::port::{InMemoryResourceRegistry, TransactionManager};
use multitx_core::{
    AppError, CoordinationOutcome, MultiTransactionCoordinator, MultiTransactional, ResourceName,
};
use multitx_infra_sqlite::{create_pool, SqliteTransaction, SqliteTransactionManager};
use sqlx::SqlitePool;

#[derive(Debug, thiserror::Error)]
enum ShopError {
    #[error("insufficient stock for {0}")]
    InsufficientStock(String),

    #[error(transparent)]
    Tx(#[from] AppError),

    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

struct Shop {
    coordinator: MultiTransactionCoordinator,
    orders: SqlitePool,
    inventory: SqlitePool,
}

async fn shop() -> Shop {
    let orders = create_pool("sqlite::memory:", 1).await.unwrap();
    sqlx::query("CREATE TABLE orders (id INTEGER PRIMARY KEY, sku TEXT NOT NULL, qty INTEGER NOT NULL)")
        .execute(&orders)
        .await
        .unwrap();

    let inventory = create_pool("sqlite::memory:", 1).await.unwrap();
    sqlx::query("CREATE TABLE stock (sku TEXT PRIMARY KEY, qty INTEGER NOT NULL)")
        .execute(&inventory)
        .await
        .unwrap();
    sqlx::query("INSERT INTO stock (sku, qty) VALUES ('widget', 3)")
        .execute(&inventory)
        .await
        .unwrap();

    let mut registry = InMemoryResourceRegistry::new();
    registry
        .register(
            ResourceName::new("orders-db").unwrap(),
            Arc::new(SqliteTransactionManager::new(orders.clone())),
        )
        .unwrap();
    registry
        .register(
            ResourceName::new("inventory-db").unwrap(),
            Arc::new(SqliteTransactionManager::new(inventory.clone())),
        )
        .unwrap();

    Shop {
        coordinator: MultiTransactionCoordinator::new(Arc::new(registry)),
        orders,
        inventory,
    }
}

fn place_order() -> MultiTransactional {
    MultiTransactional::new("OrderService", "place_order")
        .unwrap()
        .with_resources(["orders-db", "inventory-db"])
        .unwrap()
}

/// Record the order, then take the quantity out of stock (fails if short)
async fn order(shop: &Shop, sku: &'static str, qty: i64) -> Result<CoordinationOutcome<i64>, ShopError> {
    shop.coordinator
        .coordinate_scoped(&place_order(), move |session| {
            Box::pin(async move {
                let orders = session.transaction_mut::<SqliteTransaction>("orders-db")?;
                let order_id = sqlx::query("INSERT INTO orders (sku, qty) VALUES (?, ?)")
                    .bind(sku)
                    .bind(qty)
                    .execute(orders.connection())
                    .await?
                    .last_insert_rowid();

                let inventory = session.transaction_mut::<SqliteTransaction>("inventory-db")?;
                sqlx::query("UPDATE stock SET qty = qty - ? WHERE sku = ?")
                    .bind(qty)
                    .bind(sku)
                    .execute(inventory.connection())
                    .await?;

                let left: i64 = sqlx::query_scalar("SELECT qty FROM stock WHERE sku = ?")
                    .bind(sku)
                    .fetch_one(inventory.connection())
                    .await?;
                if left < 0 {
                    return Err(ShopError::InsufficientStock(sku.to_string()));
                }

                Ok(order_id)
            })
        })
        .await
}

async fn order_count(shop: &Shop) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&shop.orders)
        .await
        .unwrap()
}

async fn stock(shop: &Shop) -> i64 {
    sqlx::query_scalar("SELECT qty FROM stock WHERE sku = 'widget'")
        .fetch_one(&shop.inventory)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_successful_order_commits_both_databases() {
    let shop = shop().await;

    let outcome = order(&shop, "widget", 2).await.unwrap();

    assert_eq!(outcome, CoordinationOutcome::Committed(1));
    assert_eq!(order_count(&shop).await, 1);
    assert_eq!(stock(&shop).await, 1);
}

#[tokio::test]
async fn test_insufficient_stock_rolls_back_both_databases() {
    let shop = shop().await;

    let err = order(&shop, "widget", 5).await.unwrap_err();

    assert!(matches!(err, ShopError::InsufficientStock(ref sku) if sku == "widget"));
    assert_eq!(order_count(&shop).await, 0, "order insert must be rolled back");
    assert_eq!(stock(&shop).await, 3, "stock update must be rolled back");
}

#[tokio::test]
async fn test_sequential_orders_share_nothing_between_calls() {
    let shop = shop().await;

    order(&shop, "widget", 2).await.unwrap();
    assert!(order(&shop, "widget", 2).await.is_err());
    order(&shop, "widget", 1).await.unwrap();

    assert_eq!(order_count(&shop).await, 2);
    assert_eq!(stock(&shop).await, 0);
}

#[tokio::test]
async fn test_begin_failure_rolls_back_earlier_database() {
    let shop = shop().await;
    shop.inventory.close().await;

    let err = order(&shop, "widget", 1).await.unwrap_err();

    assert!(matches!(err, ShopError::Tx(AppError::Begin(_))));
    assert_eq!(order_count(&shop).await, 0);
}

#[tokio::test]
async fn test_empty_declaration_touches_nothing() {
    let shop = shop().await;
    let decl = MultiTransactional::new("OrderService", "noop").unwrap();

    let outcome = shop
        .coordinator
        .coordinate(&decl, || async { Ok::<_, AppError>("ran") })
        .await
        .unwrap();

    assert!(outcome.is_skipped());
    assert_eq!(order_count(&shop).await, 0);
}

#[tokio::test]
async fn test_manager_usable_outside_coordinator() {
    let shop = shop().await;
    let manager = SqliteTransactionManager::new(shop.orders.clone());

    let tx = manager.begin().await.ok().unwrap();
    tx.rollback().await.unwrap();

    assert_eq!(order_count(&shop).await, 0);
}
