//! Real-time subscriptions over WebSocket
//!
//! Exposes event bus topics to remote clients.

mod handler;
pub mod protocol;

pub use handler::subscriptions_handler;
pub use protocol::{ClientMessage, ServerMessage};
