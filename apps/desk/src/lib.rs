//! # Pharmacy Desk Library
//!
//! Entity services and shell plumbing for the pharmacy desk.
//!
//! ## Module Organization
//! ```text
//! pharmacy_desk_lib/
//! ├── lib.rs          ◄─── You are here (logging & database setup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/       ◄─── One async fn per desk operation
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use pharmacy_db::{Database, DbConfig};
use state::{ConfigState, DbState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pharmacy=trace` - Show trace for pharmacy crates only
/// - Default: `info,pharmacy=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pharmacy=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens (and if needed creates) the desk database.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Database path ── config.database_path, else platform data dir      │
/// │  2. Connect ──────── SQLite, WAL mode                                   │
/// │  3. Schema ───────── CREATE TABLE IF NOT EXISTS for all six tables     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn open_database(config: &ConfigState) -> Result<DbState, ApiError> {
    let path = match &config.database_path {
        Some(path) => path.clone(),
        None => default_database_path()?,
    };
    info!(path = %path.display(), "Database path determined");

    let db = Database::new(DbConfig::new(path)).await?;
    Ok(DbState::new(db))
}

/// Platform data directory for the database file.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.pharmacy.desk/pharmacy.db`
/// - **Windows**: `%APPDATA%\pharmacy\desk\data\pharmacy.db`
/// - **Linux**: `~/.local/share/desk/pharmacy.db`
fn default_database_path() -> Result<PathBuf, ApiError> {
    let proj_dirs = ProjectDirs::from("com", "pharmacy", "desk")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|e| {
        ApiError::internal(format!(
            "Could not create data directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    Ok(data_dir.join("pharmacy.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_database_at_configured_path() {
        let path = std::env::temp_dir().join(format!("pharmacy-desk-open-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let config = ConfigState {
            database_path: Some(path.clone()),
            ..ConfigState::default()
        };
        let db = open_database(&config).await.unwrap();

        assert!(db.inner().health_check().await);
        assert!(path.exists());

        db.inner().close().await;
        let _ = std::fs::remove_file(&path);
    }
}
