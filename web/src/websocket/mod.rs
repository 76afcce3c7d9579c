//! WebSocket HTTP handler for the web layer.
//!
//! The registry, notices and chat semantics live in the `ws` crate; this
//! module only owns the socket.

pub(crate) mod handler;
