use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use findings_core::finding::UPLOADS_URL_PREFIX;

use crate::{
    handlers::{
        findings::{create_finding, get_finding, list_findings},
        health::{livez, readyz},
        json_error_responses,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Every origin is allowed. Restrict before exposing this publicly.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/findings", get(list_findings).post(create_finding))
        .route("/findings/{id}", get(get_finding))
        .layer(DefaultBodyLimit::max(state.body_limit));

    Router::new()
        .route("/livez", get(livez))
        .route("/readyz", get(readyz))
        .nest("/api", api_routes)
        .nest_service(
            UPLOADS_URL_PREFIX,
            ServeDir::new(state.attachments.upload_dir()),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .layer(middleware::from_fn(json_error_responses))
        .with_state(state)
}
