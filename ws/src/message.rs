use crate::connection::{ClientId, ConnectionId};
use events::Id;
use std::fmt;

/// Human-readable notifications pushed to WebSocket clients.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    // Catalog mutations
    CategoryAdded { name: String },
    CategoryUpdated { name: String },
    CategoryDeleted { category_id: Id },
    ProductAdded { name: String },
    ProductUpdated { name: String },
    ProductDeleted { product_id: Id },

    // Chat room
    ClientJoined { client_id: ClientId },
    Echo { text: String },
    ClientSaid { client_id: ClientId, text: String },
    ClientLeft { client_id: ClientId },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::CategoryAdded { name } => write!(f, "Category added: {name}"),
            Notice::CategoryUpdated { name } => write!(f, "Product category updated: {name}"),
            Notice::CategoryDeleted { category_id } => {
                write!(f, "Product category deleted: ID {category_id}")
            }
            Notice::ProductAdded { name } => write!(f, "Product added: {name}"),
            Notice::ProductUpdated { name } => write!(f, "Product updated: {name}"),
            Notice::ProductDeleted { product_id } => write!(f, "Product deleted: ID {product_id}"),
            Notice::ClientJoined { client_id } => write!(f, "Client #{client_id} joined the chat"),
            Notice::Echo { text } => write!(f, "You wrote: {text}"),
            Notice::ClientSaid { client_id, text } => write!(f, "Client #{client_id} says: {text}"),
            Notice::ClientLeft { client_id } => write!(f, "Client #{client_id} left the chat"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Message {
    pub notice: Notice,
    pub scope: MessageScope,
}

#[derive(Debug, Clone)]
pub enum MessageScope {
    /// Send to one connection only
    Connection { connection_id: ConnectionId },
    /// Send to every open connection
    Broadcast,
}
