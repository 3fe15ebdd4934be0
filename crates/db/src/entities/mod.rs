//! Database entities.

#![allow(missing_docs)]

pub mod follow_relation;

pub use follow_relation::Entity as FollowRelation;
