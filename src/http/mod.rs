//! HTTP API for the pets webhook bridge
//!
//! - GET /pets?since=<unix seconds> - Records created after the cutoff
//! - POST <any path> - Save a pet from a chat-embed webhook
//! - anything else - 404

mod handlers;
mod routes;
mod server;
mod state;

pub use handlers::{cutoff_from, InvalidSince, DEFAULT_WINDOW_SECS};
pub use routes::create_router;
pub use server::serve;
pub use state::AppState;
