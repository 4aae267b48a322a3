//! Shared handler state.

use mongodb::{Client, Database};

/// State threaded through the routers.
///
/// Cheap to clone: the MongoDB client wraps an `Arc` over its connection
/// pool, and the rest is small configuration data. The `db` handle is the
/// database named by `MONGO_DATABASE`.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
