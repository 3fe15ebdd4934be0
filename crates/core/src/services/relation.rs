//! Free functions over the public relation store.
//!
//! Records are plain data; these helpers hold the create / find / sweep
//! logic so the store only has to persist rows.

use futures::future::join_all;
use gitix_common::{
    AppError, AppResult, NewRelation, RelationQuery, RelationRecord, RelationStore,
};

fn relation_write(err: AppError) -> AppError {
    match err {
        AppError::RelationWrite(_) => err,
        other => AppError::RelationWrite(other.to_string()),
    }
}

/// Create a record for `follower -> followee` unless one already exists.
///
/// Returns the existing or newly created record.
pub async fn ensure(
    store: &dyn RelationStore,
    follower: &str,
    followee: &str,
) -> AppResult<RelationRecord> {
    let existing = store
        .find_relations(RelationQuery::pair(follower, followee))
        .await
        .map_err(relation_write)?;

    if let Some(record) = existing.into_iter().next() {
        tracing::debug!(relation_id = %record.id, follower = %follower, followee = %followee, "Relation already present");
        return Ok(record);
    }

    let record = store
        .create_relation(NewRelation {
            follower: follower.to_string(),
            followee: followee.to_string(),
        })
        .await
        .map_err(relation_write)?;

    tracing::debug!(relation_id = %record.id, follower = %follower, followee = %followee, "Created relation");
    Ok(record)
}

/// Outcome of deleting every record for one edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// IDs that were deleted.
    pub deleted: Vec<String>,
    /// IDs whose deletion failed.
    pub failed: Vec<String>,
    /// Whether the lookup itself failed, leaving the records unknown.
    pub lookup_failed: bool,
}

impl SweepReport {
    /// True when the store holds no record for the edge any more.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.lookup_failed
    }
}

/// Delete every record for `follower -> followee`.
///
/// Deletions run independently; a failing one does not stop the rest.
/// A record someone else already deleted counts as deleted.
pub async fn sweep(store: &dyn RelationStore, follower: &str, followee: &str) -> SweepReport {
    let records = match store
        .find_relations(RelationQuery::pair(follower, followee))
        .await
    {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, follower = %follower, followee = %followee, "Failed to look up relations");
            return SweepReport {
                lookup_failed: true,
                ..SweepReport::default()
            };
        }
    };

    let results = join_all(records.iter().map(|r| store.delete_relation(&r.id))).await;

    let mut report = SweepReport::default();
    for (record, result) in records.into_iter().zip(results) {
        match result {
            // Already gone counts as deleted
            Ok(()) | Err(AppError::NotFound(_)) => report.deleted.push(record.id),
            Err(e) => {
                tracing::warn!(error = %e, relation_id = %record.id, "Failed to delete relation");
                report.failed.push(record.id);
            }
        }
    }
    report
}

/// Usernames publicly following `followee`, each listed once.
pub async fn followers(store: &dyn RelationStore, followee: &str) -> AppResult<Vec<String>> {
    let records = store
        .find_relations(RelationQuery::followers_of(followee))
        .await?;

    let mut seen = std::collections::HashSet::new();
    Ok(records
        .into_iter()
        .filter(|r| seen.insert(r.follower.clone()))
        .map(|r| r.follower)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gitix_common::MemoryRelationStore;

    async fn seed(store: &MemoryRelationStore, follower: &str, followee: &str) -> RelationRecord {
        store
            .create_relation(NewRelation {
                follower: follower.to_string(),
                followee: followee.to_string(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_ensure_creates_once() {
        let store = MemoryRelationStore::new();

        let first = ensure(&store, "dave.id", "bob").await.unwrap();
        let second = ensure(&store, "dave.id", "bob").await.unwrap();

        assert_eq!(first, second);
        let all = store.find_relations(RelationQuery::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_sweep_deletes_duplicates() {
        let store = MemoryRelationStore::new();
        seed(&store, "dave.id", "alice").await;
        seed(&store, "dave.id", "alice").await;
        let other = seed(&store, "dave.id", "bob").await;

        let report = sweep(&store, "dave.id", "alice").await;

        assert!(report.is_clean());
        assert_eq!(report.deleted.len(), 2);
        let left = store.find_relations(RelationQuery::default()).await.unwrap();
        assert_eq!(left, vec![other]);
    }

    #[tokio::test]
    async fn test_sweep_nothing_to_delete() {
        let store = MemoryRelationStore::new();
        let report = sweep(&store, "dave.id", "alice").await;
        assert_eq!(report, SweepReport::default());
    }

    #[tokio::test]
    async fn test_followers_are_deduplicated() {
        let store = MemoryRelationStore::new();
        seed(&store, "dave.id", "alice").await;
        seed(&store, "erin.id", "alice").await;
        seed(&store, "dave.id", "alice").await;
        seed(&store, "dave.id", "bob").await;

        let names = followers(&store, "alice").await.unwrap();
        assert_eq!(names, vec!["dave.id".to_string(), "erin.id".to_string()]);
    }
}
