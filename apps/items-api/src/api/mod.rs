//! Route composition for the items API binary.

pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// All routes this binary serves, mounted at the root path.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .merge(health::router(state.clone()))
}
