//! User Service Library
//!
//! User administration over HTTP: accounts, role sets, lifecycle status and
//! pending administrative actions. Storage is pluggable behind
//! [`repository::UserRepository`].

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::{StorageBackend, UserServiceConfig};
use crate::infra::Database;
use crate::repository::{InMemoryUserStore, UserRepository, UserStore};

/// Build the repository and optional database handle for the configured backend.
pub async fn build_repository(
    config: &UserServiceConfig,
) -> Result<(Arc<dyn UserRepository>, Option<Database>), Box<dyn std::error::Error>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory user store");
            Ok((Arc::new(InMemoryUserStore::new()), None))
        }
        StorageBackend::Postgres => {
            let db = Database::connect(&config.database).await?;
            let repo = Arc::new(UserStore::new(db.get_connection()));
            Ok((repo, Some(db)))
        }
    }
}

/// Run the HTTP server until the process receives Ctrl-C.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let (repo, database) = build_repository(&config).await?;
    let app = create_router(AppState::from_repository(repo, database));

    let addr: SocketAddr = config.server.bind_address().parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, storage = %config.storage, "User service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UserServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
