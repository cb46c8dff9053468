use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::errors::ServiceError;
use models::{cliente, pedido};

/// Fields a partial pedido update may carry; `None` leaves the stored value
/// untouched. `cliente_id` and `data_pedido` are immutable after creation.
#[derive(Clone, Debug, Default)]
pub struct PedidoUpdate {
    pub quantidade: Option<i32>,
    pub valor_unitario: Option<Decimal>,
    pub observacoes: Option<String>,
    pub pago: Option<bool>,
    pub entregue: Option<bool>,
}

/// Create a pedido after verifying the referenced cliente exists.
///
/// A missing cliente is reported as `NotFound`; the unique-per-cliente
/// constraint is enforced by storage and surfaces as a `Db` error.
pub async fn create_pedido(
    db: &DatabaseConnection,
    cliente_id: i32,
    quantidade: i32,
    valor_unitario: Decimal,
    observacoes: Option<&str>,
    pago: bool,
    entregue: bool,
) -> Result<pedido::Model, ServiceError> {
    let dono = cliente::Entity::find_by_id(cliente_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if dono.is_none() {
        return Err(ServiceError::not_found("cliente"));
    }

    let created =
        pedido::create(db, cliente_id, quantidade, valor_unitario, observacoes, pago, entregue)
            .await?;
    info!(id = created.id, cliente_id, "created pedido");
    Ok(created)
}

/// List every pedido, unordered.
pub async fn list_pedidos(db: &DatabaseConnection) -> Result<Vec<pedido::Model>, ServiceError> {
    let all = pedido::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(all)
}

/// Get a pedido by id.
pub async fn get_pedido(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<pedido::Model>, ServiceError> {
    let found = pedido::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Pedidos referencing a cliente (0 or 1 rows under the unique constraint).
pub async fn list_pedidos_by_cliente(
    db: &DatabaseConnection,
    cliente_id: i32,
) -> Result<Vec<pedido::Model>, ServiceError> {
    let found = pedido::Entity::find()
        .filter(pedido::Column::ClienteId.eq(cliente_id))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Pedidos with `pago = false`.
pub async fn list_pedidos_nao_pagos(
    db: &DatabaseConnection,
) -> Result<Vec<pedido::Model>, ServiceError> {
    let found = pedido::Entity::find()
        .filter(pedido::Column::Pago.eq(false))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Pedidos with `pago = true AND entregue = false`. Unpaid pedidos are
/// excluded: payment gates delivery.
pub async fn list_pedidos_pendentes_entrega(
    db: &DatabaseConnection,
) -> Result<Vec<pedido::Model>, ServiceError> {
    let found = pedido::Entity::find()
        .filter(pedido::Column::Pago.eq(true))
        .filter(pedido::Column::Entregue.eq(false))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Partial update; numeric bounds are revalidated before commit.
pub async fn update_pedido(
    db: &DatabaseConnection,
    id: i32,
    changes: PedidoUpdate,
) -> Result<pedido::Model, ServiceError> {
    let mut am: pedido::ActiveModel = pedido::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("pedido"))?
        .into();

    if let Some(q) = changes.quantidade {
        pedido::validate_quantidade(q)?;
        am.quantidade = Set(q);
    }
    if let Some(v) = changes.valor_unitario {
        pedido::validate_valor_unitario(v)?;
        am.valor_unitario = Set(v);
    }
    if let Some(obs) = changes.observacoes {
        pedido::validate_observacoes(&obs)?;
        am.observacoes = Set(Some(obs));
    }
    if let Some(p) = changes.pago {
        am.pago = Set(p);
    }
    if let Some(e) = changes.entregue {
        am.entregue = Set(e);
    }

    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = updated.id, "updated pedido");
    Ok(updated)
}

/// Flip `pago` on; `entregue` is never touched.
pub async fn marcar_pago(db: &DatabaseConnection, id: i32) -> Result<pedido::Model, ServiceError> {
    update_pedido(db, id, PedidoUpdate { pago: Some(true), ..Default::default() }).await
}

/// Flip `entregue` on; `pago` is never touched.
pub async fn marcar_entregue(
    db: &DatabaseConnection,
    id: i32,
) -> Result<pedido::Model, ServiceError> {
    update_pedido(db, id, PedidoUpdate { entregue: Some(true), ..Default::default() }).await
}

/// Delete a pedido, returning the row as it was before deletion.
pub async fn delete_pedido(
    db: &DatabaseConnection,
    id: i32,
) -> Result<pedido::Model, ServiceError> {
    let found = pedido::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("pedido"))?;
    pedido::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id, "deleted pedido");
    Ok(found)
}
