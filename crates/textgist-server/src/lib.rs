//! TextGist Server — axum router, shared state, route handlers.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
