use std::sync::Arc;

use cinetrack_db::DynCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend, selected once at startup.
    pub catalog: DynCatalog,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
