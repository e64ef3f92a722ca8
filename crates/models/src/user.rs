use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Active model for an insert: id is left to the store, `created_at` is now.
pub fn new_record(name: &str, email: &str) -> ActiveModel {
    ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}
