use crate::auth::strategy::AuthStrategy;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Builds the application router.
///
/// With a strategy, every route passes through the authentication gate; the
/// excluded paths (login, registration, reset, status) are let through by
/// the gate itself. With `None` the service runs open, for deployments that
/// terminate authentication upstream.
pub fn create_router(
    strategy: Option<Arc<dyn AuthStrategy>>,
    excluded_paths: Arc<Vec<String>>,
) -> Router<AppState> {
    let router = Router::new()
        .route("/", get(crate::api::handlers::status::index))
        .route("/api/status", get(crate::api::handlers::status::status))
        .route("/users", post(crate::api::handlers::users::register))
        .route(
            "/sessions",
            post(crate::api::handlers::sessions::login)
                .delete(crate::api::handlers::sessions::logout),
        )
        .route("/profile", get(crate::api::handlers::profile::profile))
        .route(
            "/reset_password",
            post(crate::api::handlers::reset::request_reset)
                .put(crate::api::handlers::reset::update_password),
        );

    match strategy {
        Some(strategy) => router.layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::gate(strategy.clone(), excluded_paths.clone(), req, next)
        })),
        None => router,
    }
}
