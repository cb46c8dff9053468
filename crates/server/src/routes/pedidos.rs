use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::error;

use crate::errors::JsonApiError;
use crate::routes::ServerState;
use service::errors::ServiceError;
use service::pedido_service::{self, PedidoUpdate};

fn default_quantidade() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CreatePedidoInput {
    pub cliente_id: i32,
    #[serde(default = "default_quantidade")]
    pub quantidade: i32,
    pub valor_unitario: Decimal,
    pub observacoes: Option<String>,
    #[serde(default)]
    pub pago: bool,
    #[serde(default)]
    pub entregue: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdatePedidoInput {
    pub quantidade: Option<i32>,
    pub valor_unitario: Option<Decimal>,
    pub observacoes: Option<String>,
    pub pago: Option<bool>,
    pub entregue: Option<bool>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreatePedidoInput>,
) -> Result<(StatusCode, Json<models::pedido::Model>), JsonApiError> {
    match pedido_service::create_pedido(
        &state.db,
        input.cliente_id,
        input.quantidade,
        input.valor_unitario,
        input.observacoes.as_deref(),
        input.pago,
        input.entregue,
    )
    .await
    {
        Ok(model) => Ok((StatusCode::CREATED, Json(model))),
        Err(e) => match e {
            ServiceError::Validation(_)
            | ServiceError::Model(models::errors::ModelError::Validation(_)) => {
                Err(JsonApiError::new(
                    StatusCode::BAD_REQUEST,
                    "Validation Error",
                    Some(e.to_string()),
                ))
            }
            // Missing cliente and unique-per-cliente violations both land here:
            // the resource being created is the pedido, so 400 rather than 404.
            _ => {
                error!(err = %e, "create pedido failed");
                Err(JsonApiError::new(
                    StatusCode::BAD_REQUEST,
                    "Create Failed",
                    Some("Erro ao criar pedido. Verifique se o cliente existe.".to_string()),
                ))
            }
        },
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::pedido::Model>>, JsonApiError> {
    pedido_service::list_pedidos(&state.db).await.map(Json).map_err(|e| {
        error!(err = %e, "list pedidos failed");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))
    })
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::pedido::Model>, JsonApiError> {
    match pedido_service::get_pedido(&state.db, id).await {
        Ok(Some(model)) => Ok(Json(model)),
        Ok(None) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Pedido não encontrado.".to_string()),
        )),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DB Error",
            Some(e.to_string()),
        )),
    }
}

pub async fn list_by_cliente(
    State(state): State<ServerState>,
    Path(cliente_id): Path<i32>,
) -> Result<Json<Vec<models::pedido::Model>>, JsonApiError> {
    pedido_service::list_pedidos_by_cliente(&state.db, cliente_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(err = %e, "list pedidos by cliente failed");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))
        })
}

pub async fn list_nao_pagos(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::pedido::Model>>, JsonApiError> {
    pedido_service::list_pedidos_nao_pagos(&state.db).await.map(Json).map_err(|e| {
        error!(err = %e, "list pedidos nao pagos failed");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))
    })
}

pub async fn list_pendentes_entrega(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::pedido::Model>>, JsonApiError> {
    pedido_service::list_pedidos_pendentes_entrega(&state.db)
        .await
        .map(Json)
        .map_err(|e| {
            error!(err = %e, "list pedidos pendentes entrega failed");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))
        })
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdatePedidoInput>,
) -> Result<Json<models::pedido::Model>, JsonApiError> {
    let changes = PedidoUpdate {
        quantidade: input.quantidade,
        valor_unitario: input.valor_unitario,
        observacoes: input.observacoes,
        pago: input.pago,
        entregue: input.entregue,
    };
    pedido_service::update_pedido(&state.db, id, changes)
        .await
        .map(Json)
        .map_err(map_pedido_update_err)
}

pub async fn marcar_pago(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::pedido::Model>, JsonApiError> {
    pedido_service::marcar_pago(&state.db, id)
        .await
        .map(Json)
        .map_err(map_pedido_update_err)
}

pub async fn marcar_entregue(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::pedido::Model>, JsonApiError> {
    pedido_service::marcar_entregue(&state.db, id)
        .await
        .map(Json)
        .map_err(map_pedido_update_err)
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::pedido::Model>, JsonApiError> {
    pedido_service::delete_pedido(&state.db, id)
        .await
        .map(Json)
        .map_err(|e| match e {
            ServiceError::NotFound(_) => JsonApiError::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some("Pedido não encontrado.".to_string()),
            ),
            _ => {
                error!(err = %e, "delete pedido failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string()))
            }
        })
}

fn map_pedido_update_err(e: ServiceError) -> JsonApiError {
    match e {
        ServiceError::Validation(_) | ServiceError::Model(_) => {
            JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
        }
        ServiceError::NotFound(_) => JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Pedido não encontrado.".to_string()),
        ),
        _ => {
            error!(err = %e, "update pedido failed");
            JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string()))
        }
    }
}
