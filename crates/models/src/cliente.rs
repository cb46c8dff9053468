use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nome: String,
    pub telefone: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_nome(nome: &str) -> Result<(), errors::ModelError> {
    if nome.trim().is_empty() {
        return Err(errors::ModelError::Validation("nome required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    nome: &str,
    telefone: &str,
) -> Result<Model, errors::ModelError> {
    validate_nome(nome)?;
    let am = ActiveModel {
        nome: Set(nome.to_string()),
        telefone: Set(telefone.to_string()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
