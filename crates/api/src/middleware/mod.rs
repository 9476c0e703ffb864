//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first, all before routing)
//!
//! 1. Sentry layers (when configured)
//! 2. `TraceLayer` (request tracing, span carries `request_id`)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (fixed headers on every response, `OPTIONS` answered here)
//!
//! Sessions are not a layer: handlers pull them with the [`RequireSession`]
//! and [`OptionalSession`] extractors.

pub mod auth;
pub mod cors;
pub mod request_id;

pub use auth::{OptionalSession, RequireSession};
pub use cors::{CorsPolicy, cors_middleware};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
