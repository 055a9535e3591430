use async_trait::async_trait;
use sea_orm::sea_query::Condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainResult, EventPredicate, EventStore, RollupQuery, VisitorEvent};
use crate::infrastructure::database::entities::visit_event;

pub struct EventRepository {
    db: DatabaseConnection,
}

impl EventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn event_model_to_domain(model: visit_event::Model) -> VisitorEvent {
    VisitorEvent {
        date: model.date,
        uuid: model.uuid,
        kind: model.kind,
        info: model.info,
        time: model.time,
        page: model.page,
        device: model.device,
        browser: model.browser,
        os: model.os,
        screen_resolution: model.screen_resolution,
    }
}

/// Lowers a typed rollup query to a SQL condition. The date window is
/// two lexicographic comparisons against the stored ISO strings.
fn condition_for(query: &RollupQuery) -> Condition {
    let mut condition = Condition::all()
        .add(visit_event::Column::Date.gte(query.range.lower_bound()))
        .add(visit_event::Column::Date.lt(query.range.upper_bound()));

    for predicate in &query.predicates {
        condition = match predicate {
            EventPredicate::KindIs(kind) => {
                condition.add(visit_event::Column::Kind.eq(kind.as_str()))
            }
            EventPredicate::InfoIs(tag) => condition.add(visit_event::Column::Info.eq(*tag)),
            EventPredicate::InfoPresent => condition
                .add(visit_event::Column::Info.is_not_null())
                .add(visit_event::Column::Info.ne("")),
            EventPredicate::TimePresent => condition.add(visit_event::Column::Time.is_not_null()),
            EventPredicate::BrowserPresent => condition
                .add(visit_event::Column::Browser.is_not_null())
                .add(visit_event::Column::Browser.ne("")),
        };
    }

    condition
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl EventStore for EventRepository {
    async fn append(&self, event: VisitorEvent) -> DomainResult<()> {
        let record = visit_event::ActiveModel {
            date: Set(event.date),
            uuid: Set(event.uuid),
            kind: Set(event.kind),
            info: Set(event.info),
            time: Set(event.time),
            page: Set(event.page),
            device: Set(event.device),
            browser: Set(event.browser),
            os: Set(event.os),
            screen_resolution: Set(event.screen_resolution),
            ..Default::default()
        };

        record.insert(&self.db).await?;
        Ok(())
    }

    async fn events_matching(&self, query: &RollupQuery) -> DomainResult<Vec<VisitorEvent>> {
        let models = visit_event::Entity::find()
            .filter(condition_for(query))
            .order_by_asc(visit_event::Column::Date)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(event_model_to_domain).collect())
    }
}

// ── Tests ──────────────────────────────────────────────────────
