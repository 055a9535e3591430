//! Visit event entity for database
//!
//! Append-only. `date` is kept as the raw ISO-8601 string the tracker
//! sent; range filtering and day bucketing are textual, so nothing here
//! parses it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Visit event model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visit_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date: String,
    pub uuid: String,
    #[sea_orm(column_name = "type")]
    pub kind: Option<String>,
    pub info: Option<String>,
    pub time: Option<i64>,
    pub page: String,
    pub device: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub screen_resolution: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
