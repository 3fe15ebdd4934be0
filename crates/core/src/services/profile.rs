//! Profile lookup types consumed by the follow services.

use serde::Deserialize;

/// A profile as returned by the upstream profile lookup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profile {
    /// Attached images; the first one is the avatar.
    #[serde(default)]
    pub image: Vec<ProfileImage>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Free-form bio.
    #[serde(default)]
    pub description: Option<String>,
}

/// One image attached to a profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileImage {
    /// Image location.
    #[serde(rename = "contentUrl", default)]
    pub content_url: Option<String>,
}

impl Profile {
    /// URL of the first image, if it has a non-empty one.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.image
            .first()
            .and_then(|img| img.content_url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// The signed-in user driving a follow or unfollow.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser {
    /// Public username, when the session has one.
    pub username: Option<String>,
}

impl CurrentUser {
    /// A session identified by a public username.
    #[must_use]
    pub fn public(username: &str) -> Self {
        Self {
            username: Some(username.to_string()),
        }
    }

    /// A session with no public identity.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { username: None }
    }

    /// The username relation records are written under.
    #[must_use]
    pub fn public_username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.is_empty())
    }
}
