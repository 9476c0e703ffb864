//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (database)
//!
//! # Accounts
//! POST   /register            - Create an account
//! POST   /login               - Password login, sets session cookie
//! GET    /check-login         - Current session's user
//! POST   /logout              - Expire the session cookie
//!
//! # Products
//! GET    /product/?id=N       - One product
//! GET    /products            - All products
//! POST   /product/add         - Create a product
//! PUT    /product/update?id=N - Overwrite a product
//! DELETE /product/delete?id=N - Remove a product
//! ```
//!
//! Any other method on these paths is 405; unknown paths are 404. `OPTIONS`
//! never reaches the router (see [`crate::middleware::cors`]).

pub mod auth;
pub mod health;
pub mod products;

use axum::{
    Router,
    http::Request,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::middleware::{cors_middleware, request_id_middleware};
use crate::state::AppState;

/// Create the account routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/check-login", get(auth::check_login))
        .route("/logout", post(auth::logout))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/product/", get(products::show))
        .route("/products", get(products::index))
        .route("/product/add", post(products::add))
        .route("/product/update", put(products::update))
        .route("/product/delete", delete(products::remove))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(product_routes())
}

/// Build the complete application: routes, fallbacks and middleware.
///
/// The middleware sits on an outer router whose only handler is the inner
/// router, so it runs before routing. From the outside in: trace span,
/// request ID, CORS.
pub fn app(state: AppState) -> Router {
    let cors = state.cors().clone();

    let inner = routes()
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .fallback_service(inner)
        .layer(axum::middleware::from_fn_with_state(cors, cors_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found".to_owned())
}
