use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// (index name, table, column) for every foreign key column.
const INDEXES: [(&str, &str, &str); 5] = [
    ("idx_products_user_id", "products", "user_id"),
    ("idx_orders_user_id", "orders", "user_id"),
    ("idx_order_lines_order_id", "order_lines", "order_id"),
    ("idx_order_lines_product_id", "order_lines", "product_id"),
    ("idx_payments_order_id", "payments", "order_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Alias::new(table))
                        .col(Alias::new(column))
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, _, _) in INDEXES.iter().rev() {
            manager
                .drop_index(Index::drop().name(*name).to_owned())
                .await?;
        }
        Ok(())
    }
}
