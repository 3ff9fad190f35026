//! Binding HTTP do servidor MCP.
//!
//! - `GET /`  devolve o catálogo, sem ler o corpo
//! - `POST /` recebe uma request JSON-RPC e devolve a response
//!
//! O corpo do POST é lido como bytes brutos: JSON malformado ou UTF-8
//! inválido ainda produz o envelope de erro JSON-RPC, com status HTTP 200.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::FactCheckResult;

use super::protocol::JsonRpcResponse;
use super::server::Dispatcher;

/// Monta o router sobre um dispatcher compartilhado.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", get(catalog).post(rpc))
        .with_state(dispatcher)
}

async fn catalog(State(dispatcher): State<Arc<Dispatcher>>) -> Json<Value> {
    tracing::debug!("Catalog requested");
    Json(dispatcher.catalog_value().clone())
}

async fn rpc(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> Json<JsonRpcResponse> {
    Json(dispatcher.handle_body(&body).await)
}

/// Serve HTTP em `bind` até Ctrl+C.
pub async fn serve(bind: &str, dispatcher: Arc<Dispatcher>) -> FactCheckResult<()> {
    let listener = TcpListener::bind(bind).await?;
    serve_on(listener, dispatcher).await
}

/// Serve HTTP em um listener já aberto.
pub async fn serve_on(listener: TcpListener, dispatcher: Arc<Dispatcher>) -> FactCheckResult<()> {
    tracing::info!(
        addr = %listener.local_addr()?,
        style = %dispatcher.style(),
        tools = dispatcher.registry().len(),
        "MCP HTTP server listening"
    );

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("MCP HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
