pub mod v1;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use atrium_core::api::routes::system;

use crate::{
    handlers::{health_handler, ping_handler},
    infra::{app_state::AppState, config::CorsConfig},
};

/// Full application router: API, legacy aliases, blob files and health checks.
pub fn create_app(state: AppState) -> Router {
    let blobs_mount = format!("/{}", state.config.storage.public_prefix);
    let blob_files = ServeDir::new(&state.config.storage.upload_root);

    let cors_layer = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        build_cors_layer(&state.config.cors)
    };

    Router::new()
        .route(system::PING, get(ping_handler))
        .route(system::HEALTH, get(health_handler))
        .merge(v1::create_v1_router(&state))
        .merge(v1::create_legacy_router(&state))
        .nest_service(&blobs_mount, blob_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer),
        )
        .with_state(state)
}

fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let allow_origin = if cors.allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = cors
            .allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();
        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| match Method::from_bytes(m.as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                warn!(method = %m, "ignoring invalid CORS method");
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
            Ok(header) => Some(header),
            Err(_) => {
                warn!(header = %h, "ignoring invalid CORS header");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers))
}
