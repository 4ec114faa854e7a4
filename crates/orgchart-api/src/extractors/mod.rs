//! Axum extractors for request handling
//!
//! Custom extractors for caller identity and validated bodies.

mod sender;
mod validated;

pub use sender::{Sender, USER_ID_HEADER};
pub use validated::ValidatedJson;
