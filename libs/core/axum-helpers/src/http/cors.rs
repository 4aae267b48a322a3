use tower_http::cors::CorsLayer;

/// Create a permissive CORS layer.
///
/// Allows any origin, method, and header. Suitable for APIs without
/// browser-credentialed clients; lock this down before fronting a
/// cookie-authenticated UI.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
