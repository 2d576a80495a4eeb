//! Development server with live reload for lectern sites.
//!
//! Builds the site into a scratch directory, serves it, and rebuilds on
//! every change to the site's inputs. Connected browsers reload over a
//! WebSocket once a rebuild succeeds.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{rebuild, serve_dir, watch_paths, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{ReloadHub, ReloadMessage};
