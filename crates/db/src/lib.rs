//! Database layer for gitix.
//!
//! Hosts the SQL-backed relation record store: one row per public
//! "follows" edge, queried by follower or followee.

pub mod entities;
pub mod migrations;
pub mod repositories;

use std::sync::Arc;
use std::time::Duration;

use gitix_common::{AppError, AppResult, config::DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::log::LevelFilter;

pub use repositories::FollowRelationRepository;

/// Open a connection pool for the relation database.
pub async fn init(config: &DatabaseConfig) -> AppResult<DatabaseConnection> {
    let mut opt = ConnectOptions::new(&config.url);

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Bring the `follow_relation` schema up to date.
pub async fn migrate(db: &DatabaseConnection) -> AppResult<()> {
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}

/// Connect, migrate, and hand back a relation store ready for the synchronizer.
pub async fn connect(config: &DatabaseConfig) -> AppResult<FollowRelationRepository> {
    let db = init(config).await?;
    migrate(&db).await?;
    tracing::info!(max_connections = config.max_connections, "Relation database ready");
    Ok(FollowRelationRepository::new(Arc::new(db)))
}
