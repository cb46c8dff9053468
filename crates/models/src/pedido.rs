use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{cliente, errors};

pub const OBSERVACOES_MAX_LEN: usize = 500;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pedidos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // UNIQUE at the schema level: one pedido per cliente
    #[sea_orm(unique)]
    pub cliente_id: i32,
    pub quantidade: i32,
    pub data_pedido: DateTimeWithTimeZone,
    pub pago: bool,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub valor_unitario: Decimal,
    pub observacoes: Option<String>,
    pub entregue: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Cliente,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Cliente => Entity::belongs_to(cliente::Entity)
                .from(Column::ClienteId)
                .to(cliente::Column::Id)
                .into(),
        }
    }
}

impl Related<cliente::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cliente.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_quantidade(quantidade: i32) -> Result<(), errors::ModelError> {
    if quantidade <= 0 {
        return Err(errors::ModelError::Validation("quantidade must be > 0".into()));
    }
    Ok(())
}

pub fn validate_valor_unitario(valor: Decimal) -> Result<(), errors::ModelError> {
    if valor <= Decimal::ZERO {
        return Err(errors::ModelError::Validation("valor_unitario must be > 0".into()));
    }
    Ok(())
}

pub fn validate_observacoes(observacoes: &str) -> Result<(), errors::ModelError> {
    if observacoes.chars().count() > OBSERVACOES_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "observacoes must be at most {OBSERVACOES_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Insert a pedido; `data_pedido` is stamped here and never updated.
/// The caller is responsible for checking that the cliente exists.
#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &DatabaseConnection,
    cliente_id: i32,
    quantidade: i32,
    valor_unitario: Decimal,
    observacoes: Option<&str>,
    pago: bool,
    entregue: bool,
) -> Result<Model, errors::ModelError> {
    validate_quantidade(quantidade)?;
    validate_valor_unitario(valor_unitario)?;
    if let Some(obs) = observacoes {
        validate_observacoes(obs)?;
    }
    let am = ActiveModel {
        cliente_id: Set(cliente_id),
        quantidade: Set(quantidade),
        data_pedido: Set(Utc::now().into()),
        pago: Set(pago),
        valor_unitario: Set(valor_unitario),
        observacoes: Set(observacoes.map(str::to_string)),
        entregue: Set(entregue),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
