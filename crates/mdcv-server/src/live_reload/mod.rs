//! Live reload support.
//!
//! Watches the CV source and compiled stylesheet for changes and pushes
//! reload events to connected browsers over WebSocket.

mod debouncer;
mod manager;
mod websocket;

pub(crate) use manager::{LiveReloadManager, ReloadEvent, watch_roots};
pub(crate) use websocket::ws_handler;
