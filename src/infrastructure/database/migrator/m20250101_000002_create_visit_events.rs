//! Create visit_events table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VisitEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitEvents::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VisitEvents::Date).string().not_null())
                    .col(ColumnDef::new(VisitEvents::Uuid).string().not_null())
                    .col(ColumnDef::new(VisitEvents::Type).string())
                    .col(ColumnDef::new(VisitEvents::Info).string())
                    .col(ColumnDef::new(VisitEvents::Time).big_integer())
                    .col(ColumnDef::new(VisitEvents::Page).string().not_null())
                    .col(ColumnDef::new(VisitEvents::Device).string())
                    .col(ColumnDef::new(VisitEvents::Browser).string())
                    .col(ColumnDef::new(VisitEvents::Os).string())
                    .col(ColumnDef::new(VisitEvents::ScreenResolution).string())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitEvents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum VisitEvents {
    Table,
    Id,
    Date,
    Uuid,
    Type,
    Info,
    Time,
    Page,
    Device,
    Browser,
    Os,
    ScreenResolution,
}
