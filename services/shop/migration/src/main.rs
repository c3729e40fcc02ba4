use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(sportzone_shop_migration::Migrator).await;
}
