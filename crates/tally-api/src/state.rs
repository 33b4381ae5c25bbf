//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use tally_auth::SessionAuthenticator;
use tally_database::DatabasePool;

/// Shared dependencies, passed to every handler via `State<AppState>`.
///
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Login/logout orchestration.
    pub authenticator: Arc<SessionAuthenticator>,
    /// PostgreSQL pool, when credentials live in a database.
    pub database: Option<DatabasePool>,
}
