//! Following service.
//!
//! Keeps the private following list and the public relation records in step.
//! The list is authoritative for the signed-in user; relation records are a
//! best-effort mirror that other users query for follower lists.

use std::sync::Arc;

use gitix_common::{AppResult, Config, DocumentStore, RelationStore};
use tokio::sync::Mutex;

use super::follow_list::{FollowEntry, FollowListStore, FollowingList};
use super::profile::{CurrentUser, Profile};
use super::relation;

const DEFAULT_AVATAR_URL: &str = "/images/user.png";

/// Settled state returned by a follow or unfollow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowState {
    /// Whether the current user now follows the target.
    pub following: bool,
    /// Set by unfollow when relation records may still point at the target.
    /// Follow never sets it; its relation failures are only logged.
    pub mirror_stale: bool,
}

impl FollowState {
    const fn new(following: bool, mirror_stale: bool) -> Self {
        Self {
            following,
            mirror_stale,
        }
    }

    /// Whether both the list and the public mirror reflect `following`.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.mirror_stale
    }
}

/// Follow/unfollow orchestration for one signed-in session.
///
/// Clones share the same mutation guard, so follow and unfollow calls on one
/// session run one at a time.
#[derive(Clone)]
pub struct RelationSynchronizer {
    follow_list: FollowListStore,
    relations: Arc<dyn RelationStore>,
    default_avatar_url: String,
    mutation: Arc<Mutex<()>>,
}

impl RelationSynchronizer {
    /// Create a synchronizer over the `"following"` document.
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, relations: Arc<dyn RelationStore>) -> Self {
        Self {
            follow_list: FollowListStore::new(documents),
            relations,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
            mutation: Arc::new(Mutex::new(())),
        }
    }

    /// Create a synchronizer using the configured document key and avatar.
    #[must_use]
    pub fn from_config(
        config: &Config,
        documents: Arc<dyn DocumentStore>,
        relations: Arc<dyn RelationStore>,
    ) -> Self {
        Self {
            follow_list: FollowListStore::with_key(documents, &config.storage.following_key),
            relations,
            default_avatar_url: config.profile.default_avatar_url.clone(),
            mutation: Arc::new(Mutex::new(())),
        }
    }

    /// Follow a user.
    ///
    /// The list entry is added at most once. When the current user has a
    /// public username a relation record is written first; a failure there is
    /// logged and does not stop the list from being saved.
    pub async fn follow(
        &self,
        current_user: &CurrentUser,
        target_username: &str,
        target_profile: &Profile,
    ) -> AppResult<FollowState> {
        let _guard = self.mutation.lock().await;

        let mut list = self.follow_list.load().await?;

        let collapsed = list.dedup();
        if collapsed > 0 {
            tracing::debug!(removed = collapsed, "Collapsed duplicate following entries");
        }
        let entry =
            FollowEntry::from_profile(target_username, target_profile, &self.default_avatar_url);
        let added = list.push_unique(entry);

        // Mirror publicly
        if let Some(follower) = current_user.public_username() {
            if let Err(e) =
                relation::ensure(self.relations.as_ref(), follower, target_username).await
            {
                tracing::warn!(error = %e, follower = %follower, followee = %target_username, "Failed to mirror follow relation");
            }
        }

        if added || collapsed > 0 {
            self.follow_list.save(&list).await?;
        }

        tracing::debug!(followee = %target_username, added, "Followed user");
        Ok(FollowState::new(true, false))
    }

    /// Unfollow a user.
    ///
    /// Removes every list entry for the target and, for a public user, every
    /// matching relation record. Relation failures do not stop the list from
    /// being saved; they are reported through [`FollowState::mirror_stale`].
    pub async fn unfollow(
        &self,
        current_user: &CurrentUser,
        target_username: &str,
    ) -> AppResult<FollowState> {
        let _guard = self.mutation.lock().await;

        let mut list = self.follow_list.load().await?;
        let removed = list.remove_all(target_username);

        let mut mirror_stale = false;
        if let Some(follower) = current_user.public_username() {
            let report = relation::sweep(self.relations.as_ref(), follower, target_username).await;
            mirror_stale = !report.is_clean();
            if mirror_stale {
                tracing::warn!(
                    follower = %follower,
                    followee = %target_username,
                    failed = report.failed.len(),
                    lookup_failed = report.lookup_failed,
                    "Relation records may be stale after unfollow"
                );
            }
        }

        if removed > 0 {
            self.follow_list.save(&list).await?;
        }

        tracing::debug!(followee = %target_username, removed, "Unfollowed user");
        Ok(FollowState::new(false, mirror_stale))
    }

    /// Check if the current user follows `target_username`.
    ///
    /// Reads the private list only; relation records are never consulted for
    /// the current user's own state.
    pub async fn is_following(&self, target_username: &str) -> AppResult<bool> {
        Ok(self.follow_list.load().await?.contains(target_username))
    }

    /// Get the users the current user follows.
    pub async fn following(&self) -> AppResult<FollowingList> {
        self.follow_list.load().await
    }

    /// Get the usernames publicly following `username`.
    pub async fn followers(&self, username: &str) -> AppResult<Vec<String>> {
        relation::followers(self.relations.as_ref(), username).await
    }
}
