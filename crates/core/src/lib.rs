//! Core follow logic for gitix.
//!
//! A "follows" edge lives in two places: the follower's private following
//! list document and a public relation record. [`RelationSynchronizer`]
//! keeps the two converging without transactions.

pub mod services;

pub use services::*;
