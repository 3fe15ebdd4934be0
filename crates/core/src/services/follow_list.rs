//! Following list document.
//!
//! The signed-in user's private list of followees, stored as a JSON array
//! under a single document key. Every change is a read-modify-write of the
//! whole array.

use std::collections::HashSet;
use std::sync::Arc;

use gitix_common::{AppResult, DocumentStore};
use serde::{Deserialize, Serialize};

use super::profile::Profile;

/// One followed user, as stored in the following list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEntry {
    /// Avatar shown next to the entry.
    pub avatar_url: String,
    /// Display name, when the profile has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Username; unique within a list.
    pub username: String,
    /// Profile description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl FollowEntry {
    /// Build an entry from a looked-up profile.
    #[must_use]
    pub fn from_profile(username: &str, profile: &Profile, default_avatar_url: &str) -> Self {
        Self {
            avatar_url: profile
                .avatar_url()
                .unwrap_or(default_avatar_url)
                .to_string(),
            name: profile.name.clone(),
            username: username.to_string(),
            bio: profile.description.clone(),
        }
    }
}

/// Ordered list of followed users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FollowingList(Vec<FollowEntry>);

impl FollowingList {
    /// Empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[FollowEntry] {
        &self.0
    }

    /// Number of entries, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `username` is listed.
    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.0.iter().any(|e| e.username == username)
    }

    /// Append `entry` unless its username is already listed.
    ///
    /// Returns whether the entry was added.
    pub fn push_unique(&mut self, entry: FollowEntry) -> bool {
        if self.contains(&entry.username) {
            return false;
        }
        self.0.push(entry);
        true
    }

    /// Remove every entry for `username`. Returns how many were removed.
    pub fn remove_all(&mut self, username: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|e| e.username != username);
        before - self.0.len()
    }

    /// Keep only the first entry per username. Returns how many were dropped.
    pub fn dedup(&mut self) -> usize {
        let before = self.0.len();
        let mut seen = HashSet::new();
        self.0.retain(|e| seen.insert(e.username.clone()));
        before - self.0.len()
    }

    /// Consume the list into its entries.
    #[must_use]
    pub fn into_inner(self) -> Vec<FollowEntry> {
        self.0
    }
}

impl From<Vec<FollowEntry>> for FollowingList {
    fn from(entries: Vec<FollowEntry>) -> Self {
        Self(entries)
    }
}

/// Load/save access to the following list document.
#[derive(Clone)]
pub struct FollowListStore {
    documents: Arc<dyn DocumentStore>,
    key: String,
}

impl FollowListStore {
    /// Document key used when none is configured.
    pub const DEFAULT_KEY: &'static str = "following";

    /// Create a store over the default `"following"` document.
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self::with_key(documents, Self::DEFAULT_KEY)
    }

    /// Create a store over a custom document key.
    #[must_use]
    pub fn with_key(documents: Arc<dyn DocumentStore>, key: &str) -> Self {
        Self {
            documents,
            key: key.to_string(),
        }
    }

    /// Read the list. An absent document is an empty list.
    pub async fn load(&self) -> AppResult<FollowingList> {
        match self.documents.get_document(&self.key).await? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => {
                tracing::debug!(key = %self.key, "No following list yet");
                Ok(FollowingList::new())
            }
        }
    }

    /// Overwrite the stored list.
    pub async fn save(&self, list: &FollowingList) -> AppResult<()> {
        let data = serde_json::to_vec(list)?;
        self.documents.put_document(&self.key, &data).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gitix_common::{AppError, MemoryDocumentStore};

    fn entry(username: &str) -> FollowEntry {
        FollowEntry {
            avatar_url: "/images/user.png".to_string(),
            name: None,
            username: username.to_string(),
            bio: None,
        }
    }

    #[test]
    fn test_from_profile_falls_back_to_default_avatar() {
        let profile = Profile {
            name: Some("Alice".to_string()),
            ..Default::default()
        };

        let entry = FollowEntry::from_profile("alice.id", &profile, "/images/user.png");
        assert_eq!(entry.avatar_url, "/images/user.png");
        assert_eq!(entry.name.as_deref(), Some("Alice"));
        assert_eq!(entry.bio, None);
    }

    #[test]
    fn test_push_unique() {
        let mut list = FollowingList::new();
        assert!(list.push_unique(entry("alice")));
        assert!(!list.push_unique(entry("alice")));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_all_and_dedup() {
        let mut list = FollowingList::from(vec![entry("alice"), entry("bob"), entry("alice")]);
        assert_eq!(list.clone().dedup(), 1);

        assert_eq!(list.remove_all("alice"), 2);
        assert_eq!(list.remove_all("alice"), 0);
        assert_eq!(list.entries(), &[entry("bob")]);
    }

    #[test]
    fn test_reads_documents_with_missing_and_extra_fields() {
        let list: FollowingList = serde_json::from_str(
            r#"[{"avatarUrl":"a.png","username":"alice","location":"Berlin"},
                {"avatarUrl":"b.png","name":"Bob","username":"bob","bio":"hi"}]"#,
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].name, None);
        assert_eq!(list.entries()[1].bio.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn test_load_absent_document_is_empty() {
        let store = FollowListStore::new(Arc::new(MemoryDocumentStore::new()));
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let documents = Arc::new(MemoryDocumentStore::new());
        let store = FollowListStore::new(documents.clone());
        let list = FollowingList::from(vec![entry("alice")]);

        store.save(&list).await.unwrap();

        assert_eq!(store.load().await.unwrap(), list);
        let raw = documents.get_document("following").await.unwrap().unwrap();
        assert_eq!(
            String::from_utf8(raw).unwrap(),
            r#"[{"avatarUrl":"/images/user.png","username":"alice"}]"#
        );
    }

    #[tokio::test]
    async fn test_load_corrupt_document_fails() {
        let documents = Arc::new(MemoryDocumentStore::new());
        documents.put_document("following", b"not json").await.unwrap();
        let store = FollowListStore::new(documents);

        let result = store.load().await;
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
