//! HTTP transport - exposes a [`RecordStore`] as a small REST resource.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /products` — every record, in insertion order.
//! - `GET /products/:id` — one record, or 404.
//! - `POST /products` — insert; 201 with the stored record, 409 on a duplicate code.
//! - `PUT /products/:id` — shallow merge of a JSON object; 200 or 404.
//! - `DELETE /products/:id` — always `{ "ok": true }` unless storage fails.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use product_store::{http, RecordStore};
//!
//! let store = Arc::new(RecordStore::open("productos.json"));
//! http::serve(store, "0.0.0.0:8080").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::StoreError;
use crate::record::{Fields, Record};
use crate::storage::Storage;
use crate::store::RecordStore;

type SharedStore<S> = Arc<RecordStore<S>>;

/// Build an axum `Router` serving the store under `/products`.
pub fn router<S: Storage + 'static>(store: SharedStore<S>) -> Router {
    Router::new()
        .route("/products", get(list_handler::<S>).post(add_handler::<S>))
        .route(
            "/products/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(store)
}

/// Serve the store over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S: Storage + 'static>(
    store: SharedStore<S>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "serving products");
    axum::serve(listener, app).await
}

async fn list_handler<S: Storage + 'static>(State(store): State<SharedStore<S>>) -> Response {
    match store.list().await {
        Ok(records) => Json(records).into_response(),
        Err(e) => error_response(e),
    }
}

async fn get_handler<S: Storage + 'static>(
    State(store): State<SharedStore<S>>,
    Path(id): Path<u64>,
) -> Response {
    match store.get(id).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => not_found(id),
        Err(e) => error_response(e),
    }
}

async fn add_handler<S: Storage + 'static>(
    State(store): State<SharedStore<S>>,
    Json(record): Json<Record>,
) -> Response {
    match store.add(record).await {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn update_handler<S: Storage + 'static>(
    State(store): State<SharedStore<S>>,
    Path(id): Path<u64>,
    Json(fields): Json<Fields>,
) -> Response {
    match store.update(id, fields).await {
        Ok(Some(record)) => Json(record).into_response(),
        Ok(None) => not_found(id),
        Err(e) => error_response(e),
    }
}

async fn delete_handler<S: Storage + 'static>(
    State(store): State<SharedStore<S>>,
    Path(id): Path<u64>,
) -> Response {
    match store.delete(id).await {
        Ok(ok) => Json(json!({ "ok": ok })).into_response(),
        Err(e) => error_response(e),
    }
}

fn not_found(id: u64) -> Response {
    let body = json!({ "error": format!("product {} not found", id) });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

fn error_response(err: StoreError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        tracing::error!(error = %err, "store operation failed");
    }
    let body = json!({ "error": err.to_string() });
    (status, Json(body)).into_response()
}
