//! Analytics index maintenance
//!
//! The rollup queries filter on `date` plus one or two other columns,
//! so the table carries a set of compound indexes matched to each
//! rollup's access path. Everything is created `IF NOT EXISTS` and this
//! runs on every startup; a failure degrades query speed, not
//! correctness, so the caller treats errors as non-fatal.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};
use tracing::info;

use super::entities::visit_event;

fn index(name: &str, columns: &[visit_event::Column]) -> IndexCreateStatement {
    let mut statement = Index::create()
        .name(name)
        .table(visit_event::Entity)
        .if_not_exists()
        .to_owned();
    for column in columns {
        statement.col(*column);
    }
    statement
}

fn index_statements() -> Vec<IndexCreateStatement> {
    use visit_event::Column::{Browser, Date, Device, Info, Kind, Page, Time, Uuid};

    vec![
        index("idx_visit_events_date_type", &[Date, Kind]),
        index("idx_visit_events_date_uuid", &[Date, Uuid]),
        index("idx_visit_events_date_type_page_time", &[Date, Kind, Page, Time]),
        index("idx_visit_events_date_type_info", &[Date, Kind, Info]),
        index("idx_visit_events_date_type_info_page", &[Date, Kind, Info, Page]),
        index("idx_visit_events_date_device_uuid", &[Date, Device, Uuid]),
        index("idx_visit_events_date_browser_uuid", &[Date, Browser, Uuid]),
        index("idx_visit_events_uuid", &[Uuid]),
        index("idx_visit_events_page", &[Page]),
        // Covering index for the dedup-style groupings.
        index("idx_visit_events_covering", &[Uuid, Page, Date, Kind, Info, Time]),
    ]
}

/// Creates the analytics indexes, skipping any that already exist.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    for statement in index_statements() {
        db.execute(backend.build(&statement)).await?;
    }

    info!("Visit event indexes ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use sea_orm::Database;
    use sea_orm_migration::MigratorTrait;

    #[tokio::test]
    async fn ensure_indexes_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        ensure_indexes(&db).await.unwrap();
        ensure_indexes(&db).await.unwrap();
    }
}
