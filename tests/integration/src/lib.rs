//! Integration test utilities for the org chart server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API and the subscription socket.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
