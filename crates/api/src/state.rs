use std::sync::Arc;

use crate::config::ServerConfig;
use crate::files::FileStore;
use crate::hooks::SaveStepHook;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: folio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Storage backend for uploaded article files.
    pub files: Arc<dyn FileStore>,
    /// Optional pre-save interception hook for the submission wizard.
    pub save_hook: Option<Arc<dyn SaveStepHook>>,
}
