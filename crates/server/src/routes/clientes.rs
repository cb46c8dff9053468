use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::error;

use crate::errors::JsonApiError;
use crate::routes::ServerState;
use service::cliente_service;
use service::errors::ServiceError;

#[derive(Debug, Deserialize)]
pub struct CreateClienteInput {
    pub nome: String,
    pub telefone: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateClienteInput {
    pub nome: Option<String>,
    pub telefone: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<CreateClienteInput>,
) -> Result<(StatusCode, Json<models::cliente::Model>), JsonApiError> {
    match cliente_service::create_cliente(&state.db, &input.nome, &input.telefone).await {
        Ok(model) => Ok((StatusCode::CREATED, Json(model))),
        // Rejected input keeps its field-level detail; anything the storage
        // layer refused gets the generic Portuguese message.
        Err(e) => match e {
            ServiceError::Validation(_)
            | ServiceError::Model(models::errors::ModelError::Validation(_)) => {
                Err(JsonApiError::new(
                    StatusCode::BAD_REQUEST,
                    "Validation Error",
                    Some(e.to_string()),
                ))
            }
            _ => {
                error!(err = %e, "create cliente failed");
                Err(JsonApiError::new(
                    StatusCode::BAD_REQUEST,
                    "Create Failed",
                    Some("Erro ao criar cliente.".to_string()),
                ))
            }
        },
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<models::cliente::Model>>, JsonApiError> {
    cliente_service::list_clientes(&state.db).await.map(Json).map_err(|e| {
        error!(err = %e, "list clientes failed");
        JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string()))
    })
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::cliente::Model>, JsonApiError> {
    match cliente_service::get_cliente(&state.db, id).await {
        Ok(Some(model)) => Ok(Json(model)),
        Ok(None) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Cliente não encontrado.".to_string()),
        )),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DB Error",
            Some(e.to_string()),
        )),
    }
}

pub async fn get_by_telefone(
    State(state): State<ServerState>,
    Path(telefone): Path<String>,
) -> Result<Json<models::cliente::Model>, JsonApiError> {
    match cliente_service::get_cliente_by_telefone(&state.db, &telefone).await {
        Ok(Some(model)) => Ok(Json(model)),
        Ok(None) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("Cliente não encontrado.".to_string()),
        )),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "DB Error",
            Some(e.to_string()),
        )),
    }
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateClienteInput>,
) -> Result<Json<models::cliente::Model>, JsonApiError> {
    cliente_service::update_cliente(&state.db, id, input.nome.as_deref(), input.telefone.as_deref())
        .await
        .map(Json)
        .map_err(|e| match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string()))
            }
            ServiceError::NotFound(_) => JsonApiError::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some("Cliente não encontrado.".to_string()),
            ),
            _ => {
                error!(err = %e, "update cliente failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string()))
            }
        })
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<models::cliente::Model>, JsonApiError> {
    cliente_service::delete_cliente(&state.db, id)
        .await
        .map(Json)
        .map_err(|e| match e {
            ServiceError::NotFound(_) => JsonApiError::new(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some("Cliente não encontrado.".to_string()),
            ),
            // Dependent pedido blocks the delete; the row is left untouched.
            ServiceError::Conflict(msg) => {
                JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg))
            }
            _ => {
                error!(err = %e, "delete cliente failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Delete Failed", Some(e.to_string()))
            }
        })
}
