// WebSocket module - organized into focused submodules
//
// - handler: WebSocket upgrade handler (entry point)
// - connection: Per-connection reader/writer tasks
// - sending: Frame serialization and sending
// - routes: HTTP route setup (health, state, metrics, reset)

mod connection;
mod handler;
mod routes;
mod sending;

pub use handler::{websocket_handler, TRANSPORT_MAX_MESSAGE_SIZE};
pub use routes::{app, create_router, metrics_handler, reset_handler, state_handler};
