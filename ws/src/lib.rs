//! WebSocket notification infrastructure.
//!
//! Every open WebSocket is registered in a [`connection::ConnectionRegistry`]
//! together with a bounded outbound queue. A per-socket writer task (owned by
//! the web layer) drains that queue, so pushing a notification never waits on
//! a network write.
//!
//! # Message Flow
//!
//! 1. A client opens `/ws/{client_id}`; the web layer calls
//!    [`Manager::open_channel`] and spawns the socket writer.
//! 2. A committed mutation publishes a `DomainEvent`.
//! 3. [`domain_event_handler::WsDomainEventHandler`] turns it into a
//!    [`message::Notice`] and broadcasts it through the [`Manager`].
//! 4. The registry snapshots the open channels in registration order and
//!    queues the text on each. Channels that fail are unregistered.
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry with connection and client indices
//! - `manager`: scope-based routing on top of the registry
//! - `message`: notice texts and delivery scopes
//! - `chat`: join, say and leave notices for the chat room
//! - `domain_event_handler`: bridge from domain events to broadcasts

pub mod chat;
pub mod connection;
pub mod domain_event_handler;
pub mod error;
pub mod manager;
pub mod message;

pub use manager::Manager;
