use crate::connection::ConnectionId;
use std::error::Error as StdError;
use std::fmt;

/// A notification could not be queued for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub connection_id: ConnectionId,
    pub error_kind: ErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The channel is not registered or its socket writer has stopped.
    ChannelClosed,
    /// The channel's outbound queue is full; the client is not keeping up.
    ChannelFull,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.error_kind {
            ErrorKind::ChannelClosed => write!(f, "channel {} is closed", self.connection_id),
            ErrorKind::ChannelFull => write!(f, "channel {} is full", self.connection_id),
        }
    }
}

impl StdError for Error {}
