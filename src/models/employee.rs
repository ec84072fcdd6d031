//! Employee record and the DTO for creating one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Employee record as held by the upstream service.
///
/// Upstream sends field names prefixed with `employee_`; both spellings are
/// accepted on input and the plain names are used on output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(alias = "employee_name")]
    pub name: String,
    #[serde(alias = "employee_salary")]
    pub salary: i32,
    #[serde(alias = "employee_age")]
    pub age: i32,
    #[serde(alias = "employee_title")]
    pub title: String,
    #[serde(default, alias = "employee_email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// DTO for creating an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub salary: i32,
    pub age: i32,
    pub title: String,
}

/// Field-level rejection of a create request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name must not be blank")]
    BlankName,

    #[error("salary must be greater than 0")]
    NonPositiveSalary,

    #[error("age must not be negative")]
    NegativeAge,

    #[error("title must not be blank")]
    BlankTitle,
}

impl CreateEmployeeRequest {
    /// Check the request before it is sent upstream.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName);
        }
        if self.salary <= 0 {
            return Err(ValidationError::NonPositiveSalary);
        }
        if self.age < 0 {
            return Err(ValidationError::NegativeAge);
        }
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankTitle);
        }
        Ok(())
    }
}
