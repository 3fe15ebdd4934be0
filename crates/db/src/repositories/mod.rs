//! Database repositories.

pub mod follow_relation;

pub use follow_relation::FollowRelationRepository;
