//! Web server module
//!
//! Exposes `search_objects` over plain JSON and JSON-RPC.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
