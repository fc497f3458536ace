use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum FuelLogs {
    Table,
    Id,
    Date,
    Liters,
    TotalPrice,
    Odometer,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FuelLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FuelLogs::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FuelLogs::Date).date().not_null())
                    .col(ColumnDef::new(FuelLogs::Liters).double().not_null())
                    .col(ColumnDef::new(FuelLogs::TotalPrice).double().not_null())
                    .col(ColumnDef::new(FuelLogs::Odometer).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Not unique: zero odometers are placeholders and may repeat.
        manager
            .create_index(
                Index::create()
                    .name("idx-fuel_logs-odometer")
                    .table(FuelLogs::Table)
                    .col(FuelLogs::Odometer)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FuelLogs::Table).to_owned())
            .await?;
        Ok(())
    }
}
