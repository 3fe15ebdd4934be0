//! Follow relation entity (public follow edges between usernames).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "follow_relation")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Username of the follower
    pub follower: String,

    /// Username of the followee
    pub followee: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for gitix_common::RelationRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            follower: model.follower,
            followee: model.followee,
        }
    }
}
