//! Upstream response envelope and request bodies.

use serde::{Deserialize, Serialize};

/// Wrapper used by every upstream response: `{ "data": ..., "status": ..., "error": ... }`.
///
/// `data` is optional so that a null or absent payload decodes cleanly and
/// the caller decides what absence means.
#[derive(Debug, Clone, Deserialize)]
pub struct Response<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Response<T> {
    /// Take the payload out of the envelope.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Body of the upstream delete call, which identifies records by name.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEmployeeRequest<'a> {
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    #[test]
    fn test_decode_sequence() {
        let json = r#"{"data":[{"id":"1","employee_name":"John Doe","employee_salary":100000,"employee_age":30,"employee_title":"Engineer"}],"status":"Successfully processed request."}"#;
        let response: Response<Vec<Employee>> = serde_json::from_str(json).unwrap();

        assert_eq!(response.status.as_deref(), Some("Successfully processed request."));
        let employees = response.into_data().unwrap();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].name, "John Doe");
    }

    #[test]
    fn test_decode_absent_and_null_data() {
        let absent: Response<Employee> = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(absent.into_data().is_none());

        let null: Response<Employee> = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(null.into_data().is_none());
    }

    #[test]
    fn test_decode_boolean_ack() {
        let response: Response<bool> = serde_json::from_str(r#"{"data":false}"#).unwrap();
        assert_eq!(response.into_data(), Some(false));
    }

    #[test]
    fn test_decode_error_field() {
        let response: Response<bool> =
            serde_json::from_str(r#"{"status":"Failed","error":"Too many requests"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("Too many requests"));
    }

    #[test]
    fn test_delete_body() {
        let body = serde_json::to_string(&DeleteEmployeeRequest { name: "Jane" }).unwrap();
        assert_eq!(body, r#"{"name":"Jane"}"#);
    }
}
