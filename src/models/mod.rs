//! Data models for employees and the upstream wire envelope.

pub mod employee;
pub mod envelope;

pub use employee::{CreateEmployeeRequest, Employee, ValidationError};
pub use envelope::{DeleteEmployeeRequest, Response};
