//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod departments;
pub mod employees;
pub mod health;
pub mod messages;
pub mod org_chart;
pub mod presence;
