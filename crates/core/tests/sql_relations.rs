//! Synchronizer running against the SQL relation repository.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::Utc;
use gitix_common::MemoryDocumentStore;
use gitix_core::{CurrentUser, Profile, RelationSynchronizer};
use gitix_db::{FollowRelationRepository, entities::follow_relation};
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

fn relation_row(id: &str, follower: &str, followee: &str) -> follow_relation::Model {
    follow_relation::Model {
        id: id.to_string(),
        follower: follower.to_string(),
        followee: followee.to_string(),
        created_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_follow_inserts_relation_row() {
    let row = relation_row("r1", "dave.id", "bob");
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            // existence check, then INSERT ... RETURNING
            .append_query_results([Vec::<follow_relation::Model>::new()])
            .append_query_results([[row.clone()]])
            // followers lookup
            .append_query_results([[row]])
            .into_connection(),
    );
    let sync = RelationSynchronizer::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(FollowRelationRepository::new(db)),
    );

    let state = sync
        .follow(&CurrentUser::public("dave.id"), "bob", &Profile::default())
        .await
        .unwrap();

    assert!(state.following);
    assert!(sync.is_following("bob").await.unwrap());
    assert_eq!(sync.followers("bob").await.unwrap(), vec!["dave.id".to_string()]);
}

#[tokio::test]
async fn test_unfollow_deletes_every_matching_row() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                relation_row("r1", "dave.id", "bob"),
                relation_row("r2", "dave.id", "bob"),
            ]])
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection(),
    );
    let sync = RelationSynchronizer::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(FollowRelationRepository::new(db)),
    );

    let state = sync
        .unfollow(&CurrentUser::public("dave.id"), "bob")
        .await
        .unwrap();

    assert!(!state.following);
    assert!(state.is_settled());
}

#[tokio::test]
async fn test_unfollow_with_database_down_still_settles_list() {
    let db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection refused".to_string())])
            .into_connection(),
    );
    let sync = RelationSynchronizer::new(
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(FollowRelationRepository::new(db)),
    );

    let state = sync
        .unfollow(&CurrentUser::public("dave.id"), "bob")
        .await
        .unwrap();

    assert!(!state.following);
    assert!(state.mirror_stale);
}
