use std::net::SocketAddr;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::{self, ServerState};
use server::startup::build_cors;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Ensure models prefer env over config file
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    // Connect DB and run migrations; callers skip the test when no DB is up
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let state = ServerState { db };
    let app: Router = routes::build_router(build_cors(""), state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

fn unique_telefone() -> String {
    format!("tel-{}", Uuid::new_v4())
}

#[tokio::test]
async fn e2e_public_routes() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip: cannot start server: {}", e);
            return Ok(());
        }
    };
    let c = client();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");

    let res = c.get(format!("{}/", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Sistema de Gerenciamento de Frango Assado");
    Ok(())
}

#[tokio::test]
async fn e2e_cliente_crud_and_errors() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip: cannot start server: {}", e);
            return Ok(());
        }
    };
    let c = client();
    let telefone = unique_telefone();

    // Create -> 201 with generated id
    let res = c.post(format!("{}/clientes/create", app.base_url))
        .json(&json!({"nome": "Maria", "telefone": telefone}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("id");
    assert_eq!(created["nome"], "Maria");

    // Round-trip by id and by telefone
    let res = c.get(format!("{}/clientes/get/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched, created);

    let res = c.get(format!("{}/clientes/get/telefone/{}", app.base_url, telefone)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Listing includes the new row
    let res = c.get(format!("{}/clientes/get", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let all = res.json::<Vec<serde_json::Value>>().await?;
    assert!(all.iter().any(|cli| cli["id"].as_i64() == Some(id)));

    // Partial update: telefone omitted, must survive
    let res = c.put(format!("{}/clientes/update/{}", app.base_url, id))
        .json(&json!({"nome": "Maria Silva"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["nome"], "Maria Silva");
    assert_eq!(updated["telefone"], telefone.as_str());

    // Empty nome is rejected before any write
    let res = c.post(format!("{}/clientes/create", app.base_url))
        .json(&json!({"nome": "   ", "telefone": unique_telefone()}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // Missing id -> 404 with the Portuguese detail
    let res = c.get(format!("{}/clientes/get/-1", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["detail"], "Cliente não encontrado.");

    // Delete returns the pre-deletion row; second delete is 404
    let res = c.delete(format!("{}/clientes/delete/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let deleted = res.json::<serde_json::Value>().await?;
    assert_eq!(deleted["nome"], "Maria Silva");

    let res = c.delete(format!("{}/clientes/delete/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_pedido_scenario() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip: cannot start server: {}", e);
            return Ok(());
        }
    };
    let c = client();

    // Ana places an order of 2 units at 10.50
    let res = c.post(format!("{}/clientes/create", app.base_url))
        .json(&json!({"nome": "Ana", "telefone": unique_telefone()}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let ana = res.json::<serde_json::Value>().await?;
    let ana_id = ana["id"].as_i64().expect("id");

    let res = c.post(format!("{}/pedidos/create", app.base_url))
        .json(&json!({"cliente_id": ana_id, "quantidade": 2, "valor_unitario": "10.50"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let pedido = res.json::<serde_json::Value>().await?;
    let pedido_id = pedido["id"].as_i64().expect("id");
    assert_eq!(pedido["quantidade"], 2);
    assert_eq!(pedido["valor_unitario"], "10.50");
    assert_eq!(pedido["pago"], false);
    assert_eq!(pedido["entregue"], false);

    // A second pedido for the same cliente violates the unique constraint
    let res = c.post(format!("{}/pedidos/create", app.base_url))
        .json(&json!({"cliente_id": ana_id, "quantidade": 1, "valor_unitario": "5.00"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["detail"], "Erro ao criar pedido. Verifique se o cliente existe.");

    // Lookup by cliente returns exactly the one order
    let res = c.get(format!("{}/pedidos/get/cliente/{}", app.base_url, ana_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let by_cliente = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(by_cliente.len(), 1);
    assert_eq!(by_cliente[0]["id"].as_i64(), Some(pedido_id));

    // Unpaid until marked; marcar-pago leaves entregue untouched
    let res = c.get(format!("{}/pedidos/get/nao-pagos", app.base_url)).send().await?;
    let nao_pagos = res.json::<Vec<serde_json::Value>>().await?;
    assert!(nao_pagos.iter().any(|p| p["id"].as_i64() == Some(pedido_id)));

    let res = c.patch(format!("{}/pedidos/marcar-pago/{}", app.base_url, pedido_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let pago = res.json::<serde_json::Value>().await?;
    assert_eq!(pago["pago"], true);
    assert_eq!(pago["entregue"], false);

    // Paid and undelivered -> pending delivery
    let res = c.get(format!("{}/pedidos/get/pendentes-entrega", app.base_url)).send().await?;
    let pendentes = res.json::<Vec<serde_json::Value>>().await?;
    assert!(pendentes.iter().any(|p| p["id"].as_i64() == Some(pedido_id)));

    let res = c.patch(format!("{}/pedidos/marcar-entregue/{}", app.base_url, pedido_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/pedidos/get/pendentes-entrega", app.base_url)).send().await?;
    let pendentes = res.json::<Vec<serde_json::Value>>().await?;
    assert!(!pendentes.iter().any(|p| p["id"].as_i64() == Some(pedido_id)));

    // Deleting the cliente while the pedido exists is a conflict
    let res = c.delete(format!("{}/clientes/delete/{}", app.base_url, ana_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // Partial update touches only the provided field
    let res = c.put(format!("{}/pedidos/update/{}", app.base_url, pedido_id))
        .json(&json!({"observacoes": "sem sal"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["observacoes"], "sem sal");
    assert_eq!(updated["quantidade"], 2);
    assert_eq!(updated["pago"], true);

    // Cleanup: pedido first, then cliente succeeds
    let res = c.delete(format!("{}/pedidos/delete/{}", app.base_url, pedido_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.delete(format!("{}/pedidos/delete/{}", app.base_url, pedido_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["detail"], "Pedido não encontrado.");

    let res = c.delete(format!("{}/clientes/delete/{}", app.base_url, ana_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_pedido_missing_cliente_rejected() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(e) => {
            eprintln!("skip: cannot start server: {}", e);
            return Ok(());
        }
    };
    let c = client();

    let res = c.post(format!("{}/pedidos/create", app.base_url))
        .json(&json!({"cliente_id": -42, "valor_unitario": "3.00"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["detail"], "Erro ao criar pedido. Verifique se o cliente existe.");

    // Nothing was persisted for the phantom cliente
    let res = c.get(format!("{}/pedidos/get/cliente/-42", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let rows = res.json::<Vec<serde_json::Value>>().await?;
    assert!(rows.is_empty());
    Ok(())
}
