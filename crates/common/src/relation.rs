//! Public relation records.
//!
//! A relation record is one discoverable "follows" edge stored outside any
//! user's private documents. The store may hold several records for the same
//! pair; callers that need uniqueness must sweep.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{AppError, AppResult, IdGenerator};

/// A stored relation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Username of the follower.
    pub follower: String,
    /// Username of the followee.
    pub followee: String,
}

/// Attributes of a relation record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelation {
    /// Username of the follower.
    pub follower: String,
    /// Username of the followee.
    pub followee: String,
}

/// Filter for [`RelationStore::find_relations`]. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationQuery {
    /// Required follower username.
    pub follower: Option<String>,
    /// Required followee username.
    pub followee: Option<String>,
}

impl RelationQuery {
    /// Query for a single directed edge.
    #[must_use]
    pub fn pair(follower: &str, followee: &str) -> Self {
        Self {
            follower: Some(follower.to_string()),
            followee: Some(followee.to_string()),
        }
    }

    /// Query for everyone following `followee`.
    #[must_use]
    pub fn followers_of(followee: &str) -> Self {
        Self {
            follower: None,
            followee: Some(followee.to_string()),
        }
    }

    /// Returns whether `record` satisfies this query.
    #[must_use]
    pub fn matches(&self, record: &RelationRecord) -> bool {
        self.follower.as_ref().is_none_or(|f| *f == record.follower)
            && self.followee.as_ref().is_none_or(|f| *f == record.followee)
    }
}

/// Relation record store trait.
#[async_trait::async_trait]
pub trait RelationStore: Send + Sync {
    /// Store a new record and return it with its assigned ID.
    async fn create_relation(&self, relation: NewRelation) -> AppResult<RelationRecord>;

    /// List every record matching `query`.
    async fn find_relations(&self, query: RelationQuery) -> AppResult<Vec<RelationRecord>>;

    /// Delete a record by ID.
    async fn delete_relation(&self, id: &str) -> AppResult<()>;
}

/// In-process relation store.
#[derive(Clone, Default)]
pub struct MemoryRelationStore {
    records: Arc<RwLock<Vec<RelationRecord>>>,
    id_gen: IdGenerator,
}

impl MemoryRelationStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RelationStore for MemoryRelationStore {
    async fn create_relation(&self, relation: NewRelation) -> AppResult<RelationRecord> {
        let record = RelationRecord {
            id: self.id_gen.generate(),
            follower: relation.follower,
            followee: relation.followee,
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_relations(&self, query: RelationQuery) -> AppResult<Vec<RelationRecord>> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect())
    }

    async fn delete_relation(&self, id: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(AppError::NotFound(format!("Relation {id}")));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_relation(follower: &str, followee: &str) -> NewRelation {
        NewRelation {
            follower: follower.to_string(),
            followee: followee.to_string(),
        }
    }

    #[test]
    fn test_query_matches() {
        let record = RelationRecord {
            id: "r1".to_string(),
            follower: "alice".to_string(),
            followee: "bob".to_string(),
        };

        assert!(RelationQuery::default().matches(&record));
        assert!(RelationQuery::pair("alice", "bob").matches(&record));
        assert!(RelationQuery::followers_of("bob").matches(&record));
        assert!(!RelationQuery::pair("bob", "alice").matches(&record));
    }

    #[tokio::test]
    async fn test_memory_store_keeps_duplicates() {
        let store = MemoryRelationStore::new();
        let first = store.create_relation(new_relation("alice", "bob")).await.unwrap();
        let second = store.create_relation(new_relation("alice", "bob")).await.unwrap();
        store.create_relation(new_relation("carol", "bob")).await.unwrap();

        assert_ne!(first.id, second.id);
        let found = store
            .find_relations(RelationQuery::pair("alice", "bob"))
            .await
            .unwrap();
        assert_eq!(found, vec![first, second]);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = MemoryRelationStore::new();
        let record = store.create_relation(new_relation("alice", "bob")).await.unwrap();

        store.delete_relation(&record.id).await.unwrap();
        assert!(store
            .find_relations(RelationQuery::default())
            .await
            .unwrap()
            .is_empty());

        let again = store.delete_relation(&record.id).await;
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }
}
