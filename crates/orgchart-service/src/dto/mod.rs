//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers from request DTOs to domain inputs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateDepartmentRequest, CreateEmployeeRequest, SendMessageRequest, UpdateDepartmentRequest,
    UpdateEmployeeRequest,
};

pub use responses::{
    DepartmentDetailResponse, DepartmentWithEmployees, EmployeeDetailResponse, EventPayload,
    HealthResponse, OrgChartResponse, PresenceStatusResponse, StatusChangePayload,
};
