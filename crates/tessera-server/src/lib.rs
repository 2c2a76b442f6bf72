//! Live preview development server for tessera blocks.
//!
//! Watches one block document, recompiles it on every save, and pushes the new
//! preview and generated code to the configurator page over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{router, DevServer, DevServerConfig, ServerError, ServerState, SharedState, Snapshot};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
