//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded on the request span)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Role checks are extractors in [`auth`], not layers.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    AuthRejection, RequireAdmin, RequireAuth, RequireCustomer, RequireDriver, RequireVendor,
    clear_current_user, set_current_user,
};
pub use request_id::{RequestId, request_id_middleware};
pub use session::{create_session_layer, spawn_expired_session_cleanup};
