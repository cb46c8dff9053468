use std::{env, net::SocketAddr};

use axum::http::HeaderValue;
use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{info, warn};

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

/// One configured front-end origin; permissive fallback when unset.
pub fn build_cors(allowed_origin: &str) -> CorsLayer {
    let origin = allowed_origin.trim();
    if origin.is_empty() {
        return CorsLayer::very_permissive();
    }
    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods(AllowMethods::any())
            .allow_headers(AllowHeaders::any()),
        Err(_) => {
            warn!(origin, "invalid CORS origin; falling back to permissive policy");
            CorsLayer::very_permissive()
        }
    }
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8080);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

fn load_cors_origin() -> String {
    match configs::load_default() {
        Ok(mut cfg) => {
            cfg.cors.normalize_from_env();
            cfg.cors.allowed_origin
        }
        Err(_) => env::var("CORS_ORIGIN").unwrap_or_default(),
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    // DB connection and schema
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState { db };

    // Build router
    let cors = build_cors(&load_cors_origin());
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting server crate");
    println!("starting server crate at {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
