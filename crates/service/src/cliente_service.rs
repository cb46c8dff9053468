use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::errors::ServiceError;
use models::{cliente, pedido};

/// Create a new cliente; telefone carries no uniqueness constraint.
pub async fn create_cliente(
    db: &DatabaseConnection,
    nome: &str,
    telefone: &str,
) -> Result<cliente::Model, ServiceError> {
    let created = cliente::create(db, nome, telefone).await?;
    info!(id = created.id, "created cliente");
    Ok(created)
}

/// List every cliente, unordered. No pagination by design.
pub async fn list_clientes(db: &DatabaseConnection) -> Result<Vec<cliente::Model>, ServiceError> {
    let all = cliente::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(all)
}

/// Get a cliente by id.
pub async fn get_cliente(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<cliente::Model>, ServiceError> {
    let found = cliente::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Lookup by telefone. Duplicates are allowed; the first match wins.
pub async fn get_cliente_by_telefone(
    db: &DatabaseConnection,
    telefone: &str,
) -> Result<Option<cliente::Model>, ServiceError> {
    let found = cliente::Entity::find()
        .filter(cliente::Column::Telefone.eq(telefone))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(found)
}

/// Partial update: absent fields are left untouched.
pub async fn update_cliente(
    db: &DatabaseConnection,
    id: i32,
    nome: Option<&str>,
    telefone: Option<&str>,
) -> Result<cliente::Model, ServiceError> {
    let mut am: cliente::ActiveModel = cliente::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("cliente"))?
        .into();
    if let Some(n) = nome {
        cliente::validate_nome(n)?;
        am.nome = Set(n.to_string());
    }
    if let Some(t) = telefone {
        am.telefone = Set(t.to_string());
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id = updated.id, "updated cliente");
    Ok(updated)
}

/// Delete a cliente, returning the row as it was before deletion.
///
/// A cliente that still owns a pedido is rejected with `Conflict` before the
/// statement reaches the FK RESTRICT, so callers get a clean 409 instead of
/// a raw storage error.
pub async fn delete_cliente(
    db: &DatabaseConnection,
    id: i32,
) -> Result<cliente::Model, ServiceError> {
    let found = cliente::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("cliente"))?;

    let dependente = pedido::Entity::find()
        .filter(pedido::Column::ClienteId.eq(id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if dependente.is_some() {
        return Err(ServiceError::Conflict(
            "cliente still owns a pedido; delete the pedido first".into(),
        ));
    }

    cliente::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(id, "deleted cliente");
    Ok(found)
}
