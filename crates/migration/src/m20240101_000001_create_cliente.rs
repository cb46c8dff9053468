//! Create `clientes` table.
//!
//! Stores customer records; `telefone` is a lookup key but carries no
//! uniqueness constraint.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cliente::Table)
                    .if_not_exists()
                    .col(pk_auto(Cliente::Id))
                    .col(string_len(Cliente::Nome, 255).not_null())
                    .col(string_len(Cliente::Telefone, 20).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Cliente::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Cliente {
    #[sea_orm(iden = "clientes")]
    Table,
    Id,
    Nome,
    Telefone,
}
