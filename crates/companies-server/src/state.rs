use companies_core::JwtAuth;
use companies_db::Database;

use crate::versioning::ApiVersioning;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
///
/// Built once in `main`; nothing in it is mutated after startup.
pub struct AppState {
    pub db: Database,
    pub jwt: JwtAuth,
    pub versioning: ApiVersioning,
}
