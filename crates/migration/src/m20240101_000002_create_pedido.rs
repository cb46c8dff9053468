//! Create `pedidos` table with FK to `clientes`.
//!
//! `cliente_id` is UNIQUE (one pedido per cliente) and the FK is RESTRICT:
//! deleting a cliente that still owns a pedido must be blocked, not cascaded.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pedido::Table)
                    .if_not_exists()
                    .col(pk_auto(Pedido::Id))
                    .col(integer(Pedido::ClienteId).unique_key().not_null())
                    .col(integer(Pedido::Quantidade).not_null().default(1))
                    .col(timestamp_with_time_zone(Pedido::DataPedido).not_null())
                    .col(boolean(Pedido::Pago).not_null().default(false))
                    .col(decimal_len(Pedido::ValorUnitario, 10, 2).not_null())
                    .col(
                        ColumnDef::new(Pedido::Observacoes)
                            .string_len(500)
                            .null(),
                    )
                    .col(boolean(Pedido::Entregue).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pedido_cliente")
                            .from(Pedido::Table, Pedido::ClienteId)
                            .to(Cliente::Table, Cliente::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pedido::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pedido {
    #[sea_orm(iden = "pedidos")]
    Table,
    Id,
    ClienteId,
    Quantidade,
    DataPedido,
    Pago,
    ValorUnitario,
    Observacoes,
    Entregue,
}

#[derive(DeriveIden)]
enum Cliente {
    #[sea_orm(iden = "clientes")]
    Table,
    Id,
}
