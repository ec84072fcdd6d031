pub mod aggregate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod retry;

pub use error::{GatewayError, Result, UpstreamError};
pub use gateway::EmployeeGateway;
pub use retry::RetryPolicy;
