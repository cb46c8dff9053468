use axum::{
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, Welcome};

pub mod clientes;
pub mod pedidos;

/// Shared state handed to every handler: one SeaORM pool for the process.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn welcome() -> Json<Welcome> {
    Json(Welcome { message: "Sistema de Gerenciamento de Frango Assado" })
}

/// Build the full application router: public probes plus the two CRUD surfaces
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    // Public routes (welcome + health)
    let public = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health));

    let clientes = Router::new()
        .route("/clientes/create", post(clientes::create))
        .route("/clientes/get", get(clientes::list))
        .route("/clientes/get/:id", get(clientes::get_by_id))
        .route("/clientes/get/telefone/:telefone", get(clientes::get_by_telefone))
        .route("/clientes/update/:id", put(clientes::update))
        .route("/clientes/delete/:id", delete(clientes::remove));

    let pedidos = Router::new()
        .route("/pedidos/create", post(pedidos::create))
        .route("/pedidos/get", get(pedidos::list))
        .route("/pedidos/get/:id", get(pedidos::get_by_id))
        .route("/pedidos/get/cliente/:cliente_id", get(pedidos::list_by_cliente))
        .route("/pedidos/get/nao-pagos", get(pedidos::list_nao_pagos))
        .route("/pedidos/get/pendentes-entrega", get(pedidos::list_pendentes_entrega))
        .route("/pedidos/update/:id", put(pedidos::update))
        .route("/pedidos/marcar-pago/:id", patch(pedidos::marcar_pago))
        .route("/pedidos/marcar-entregue/:id", patch(pedidos::marcar_entregue))
        .route("/pedidos/delete/:id", delete(pedidos::remove));

    // Compose
    public
        .merge(clientes)
        .merge(pedidos)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency on the way out
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
