//! Common utilities and shared types for gitix.
//!
//! This crate provides the foundational pieces used by the other gitix crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based identifiers via [`IdGenerator`]
//! - **Document storage**: Per-user keyed documents via [`DocumentStore`]
//! - **Relation records**: Public follow edges via [`RelationStore`]
//!
//! # Example
//!
//! ```no_run
//! use gitix_common::{AppResult, Config, DocumentStore, LocalDocumentStore};
//!
//! async fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let store = LocalDocumentStore::new(config.storage.documents_path.clone());
//!     let raw = store.get_document(&config.storage.following_key).await?;
//!     println!("following document present: {}", raw.is_some());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod relation;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use relation::{MemoryRelationStore, NewRelation, RelationQuery, RelationRecord, RelationStore};
pub use storage::{DocumentStore, LocalDocumentStore, MemoryDocumentStore};
