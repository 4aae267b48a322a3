//! Mounts the items domain under this binary.

use axum::Router;
use domain_items::{ItemService, MongoItemRepository, handlers};

use crate::state::AppState;

/// Items routes backed by the app's MongoDB database.
pub fn router(state: &AppState) -> Router {
    let repository = MongoItemRepository::new(state.db.clone());
    handlers::router(ItemService::new(repository))
}
