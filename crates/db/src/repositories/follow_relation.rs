//! Follow relation repository.

use std::sync::Arc;

use crate::entities::{FollowRelation, follow_relation};
use gitix_common::{
    AppError, AppResult, IdGenerator, NewRelation, RelationQuery, RelationRecord, RelationStore,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set,
};

/// Follow relation repository for database operations.
#[derive(Clone)]
pub struct FollowRelationRepository {
    db: Arc<DatabaseConnection>,
    id_gen: IdGenerator,
}

impl FollowRelationRepository {
    /// Create a new follow relation repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            db,
            id_gen: IdGenerator::new(),
        }
    }

    /// Insert a new relation row.
    pub async fn create(
        &self,
        follower: &str,
        followee: &str,
    ) -> AppResult<follow_relation::Model> {
        let model = follow_relation::ActiveModel {
            id: Set(self.id_gen.generate()),
            follower: Set(follower.to_string()),
            followee: Set(followee.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all rows matching a query, oldest first.
    pub async fn find(&self, query: &RelationQuery) -> AppResult<Vec<follow_relation::Model>> {
        let mut select = FollowRelation::find();

        if let Some(ref follower) = query.follower {
            select = select.filter(follow_relation::Column::Follower.eq(follower.as_str()));
        }
        if let Some(ref followee) = query.followee {
            select = select.filter(follow_relation::Column::Followee.eq(followee.as_str()));
        }

        select
            .order_by_asc(follow_relation::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a row by ID.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let result = FollowRelation::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Relation {id}")));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RelationStore for FollowRelationRepository {
    async fn create_relation(&self, relation: NewRelation) -> AppResult<RelationRecord> {
        let model = self.create(&relation.follower, &relation.followee).await?;
        tracing::debug!(relation_id = %model.id, follower = %model.follower, followee = %model.followee, "Stored follow relation");
        Ok(model.into())
    }

    async fn find_relations(&self, query: RelationQuery) -> AppResult<Vec<RelationRecord>> {
        let models = self.find(&query).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_relation(&self, id: &str) -> AppResult<()> {
        self.delete(id).await
    }
}
