//! # orgchart-service
//!
//! Application layer containing org chart use cases, the presence bridge, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::*;
