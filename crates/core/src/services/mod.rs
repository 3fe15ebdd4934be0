//! Follow services.

pub mod follow_list;
pub mod following;
pub mod profile;
pub mod relation;

pub use follow_list::{FollowEntry, FollowListStore, FollowingList};
pub use following::{FollowState, RelationSynchronizer};
pub use profile::{CurrentUser, Profile, ProfileImage};
pub use relation::SweepReport;
