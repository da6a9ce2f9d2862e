//! Walks a product file through add, list, get, update, and delete.
//!
//! ```text
//! PRODUCT_STORE_PATH=/tmp/productos.json RUST_LOG=debug cargo run --example basic
//! ```

use product_store::{Fields, Record, RecordStore, StoreError};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), StoreError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::var("PRODUCT_STORE_PATH").unwrap_or_else(|_| "productos.json".into());
    let store = RecordStore::open(path);

    let product = Record::new()
        .with("title", "Producto 1")
        .with("description", "Descripción del producto 1")
        .with("price", 19.99)
        .with("thumbnail", "imagen1.jpg")
        .with("code", "P001")
        .with("stock", 10);

    let created = store.add(product.clone()).await?;
    tracing::info!(product = %created, "new product");

    match store.add(product).await {
        Err(StoreError::DuplicateCode(code)) => {
            tracing::warn!(%code, "second insert rejected")
        }
        other => tracing::error!(?other, "expected a duplicate code error"),
    }

    let all = store.list().await?;
    tracing::info!(count = all.len(), "all products");

    let id = created.id().unwrap_or(1);
    match store.get(id).await? {
        Some(found) => tracing::info!(id, product = %found, "product by id"),
        None => tracing::info!(id, "no product with that id"),
    }

    let mut changes = Fields::new();
    changes.insert("price".into(), json!(24.99));
    changes.insert("stock".into(), json!(15));
    if let Some(updated) = store.update(id, changes).await? {
        tracing::info!(product = %updated, "updated product");
    }

    let deleted = store.delete(id).await?;
    tracing::info!(id, deleted, "deleted product");

    let remaining = store.list().await?;
    tracing::info!(count = remaining.len(), "remaining products");

    Ok(())
}
