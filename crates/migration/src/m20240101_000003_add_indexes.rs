use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clientes: telefone is a secondary lookup key
        manager
            .create_index(
                Index::create()
                    .name("idx_cliente_telefone")
                    .table(Cliente::Table)
                    .col(Cliente::Telefone)
                    .to_owned(),
            )
            .await?;

        // Pedidos: status filters scan on pago/entregue
        manager
            .create_index(
                Index::create()
                    .name("idx_pedido_pago")
                    .table(Pedido::Table)
                    .col(Pedido::Pago)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_pedido_entregue")
                    .table(Pedido::Table)
                    .col(Pedido::Entregue)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cliente_telefone").table(Cliente::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pedido_pago").table(Pedido::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_pedido_entregue").table(Pedido::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Cliente {
    #[sea_orm(iden = "clientes")]
    Table,
    Telefone,
}

#[derive(DeriveIden)]
enum Pedido {
    #[sea_orm(iden = "pedidos")]
    Table,
    Pago,
    Entregue,
}
