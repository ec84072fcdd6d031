//! Gateway to the upstream employee-record service.

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::aggregate::{self, TOP_EARNERS_LIMIT};
use crate::config::UpstreamConfig;
use crate::error::{GatewayError, Result, UpstreamError};
use crate::models::{CreateEmployeeRequest, DeleteEmployeeRequest, Employee, Response};
use crate::retry::{AttemptError, RetryPolicy};

type AttemptResult<T> = std::result::Result<T, AttemptError>;

/// Upstream employee service client.
///
/// Holds no state besides its configuration, so one instance can serve any
/// number of concurrent calls. Every call fetches fresh data; nothing is
/// cached between calls.
#[derive(Debug, Clone)]
pub struct EmployeeGateway {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl EmployeeGateway {
    /// Create a gateway for the given upstream.
    ///
    /// # Errors
    /// Returns `UpstreamFailure` if the base URL is not a usable http(s) URL
    /// or the HTTP client cannot be built.
    pub fn new(upstream: &UpstreamConfig, retry: RetryPolicy) -> Result<Self> {
        let raw = upstream.base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(raw)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{raw}: {e}")))
            .and_then(|url| {
                if url.cannot_be_a_base() {
                    Err(UpstreamError::InvalidUrl(format!("{raw}: not a base URL")))
                } else {
                    Ok(url)
                }
            })
            .map_err(|e| GatewayError::upstream("Invalid upstream base URL", e))?;

        let client = Client::builder()
            .timeout(upstream.timeout())
            .build()
            .map_err(|e| GatewayError::upstream("Failed to create upstream client", UpstreamError::Http(e)))?;

        Ok(Self {
            client,
            base_url,
            retry,
        })
    }

    /// Fetch every employee. An envelope without data yields an empty list.
    pub async fn fetch_all(&self) -> Result<Vec<Employee>> {
        info!("Fetching all employees");
        self.retry.run("fetch employees", || self.fetch_all_once()).await
    }

    /// Fetch one employee by id.
    ///
    /// # Errors
    /// `NotFound` when upstream answers 404 or returns no data; this is not
    /// retried. `UpstreamFailure` once retries are exhausted.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Employee> {
        info!("Fetching employee with id: {id}");
        // an empty id cannot name a record; `{base}/` would hit the list endpoint
        if id.is_empty() {
            return Err(GatewayError::not_found(id));
        }
        self.retry.run("fetch employee", || self.fetch_by_id_once(id)).await
    }

    /// Create an employee and return the record upstream stored.
    pub async fn create(&self, request: &CreateEmployeeRequest) -> Result<Employee> {
        info!("Creating new employee: {}", request.name);
        self.retry.run("create employee", || self.create_once(request)).await
    }

    /// Delete the employee with the given id and return its name.
    ///
    /// Upstream deletes by name, so the record is resolved first. The name is
    /// returned even when upstream acknowledges the delete with `false`; that
    /// case is only logged.
    pub async fn delete_by_id(&self, id: &str) -> Result<String> {
        info!("Deleting employee with id: {id}");
        let employee = self.fetch_by_id(id).await?;

        let acknowledged = self
            .retry
            .run("delete employee", || self.delete_once(&employee.name))
            .await?;

        if acknowledged != Some(true) {
            warn!(
                "Upstream did not confirm deletion of '{}' (id {id}), ack={acknowledged:?}",
                employee.name
            );
        }

        Ok(employee.name)
    }

    /// Employees whose name contains `term`, ignoring case.
    pub async fn search(&self, term: &str) -> Result<Vec<Employee>> {
        info!("Searching employees with name containing: {term}");
        let employees = self.fetch_all().await?;
        Ok(aggregate::search(&employees, term))
    }

    /// Highest salary across all employees, 0 when there are none.
    pub async fn highest_salary(&self) -> Result<i32> {
        info!("Fetching highest salary");
        let employees = self.fetch_all().await?;
        Ok(aggregate::max_salary(&employees))
    }

    /// Names of the ten best paid employees.
    pub async fn top_ten_names(&self) -> Result<Vec<String>> {
        info!("Fetching top {TOP_EARNERS_LIMIT} highest earning employee names");
        let employees = self.fetch_all().await?;
        Ok(aggregate::top_earners(&employees, TOP_EARNERS_LIMIT))
    }

    async fn fetch_all_once(&self) -> AttemptResult<Vec<Employee>> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let envelope: Response<Vec<Employee>> = decode(response).await?;
        Ok(envelope.into_data().unwrap_or_default())
    }

    async fn fetch_by_id_once(&self, id: &str) -> AttemptResult<Employee> {
        let response = self.client.get(self.item_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AttemptError::Abort(GatewayError::not_found(id)));
        }

        let envelope: Response<Employee> = decode(response).await?;
        envelope
            .into_data()
            .ok_or_else(|| AttemptError::Abort(GatewayError::not_found(id)))
    }

    async fn create_once(&self, request: &CreateEmployeeRequest) -> AttemptResult<Employee> {
        let response = self.client.post(self.base_url.clone()).json(request).send().await?;
        let envelope: Response<Employee> = decode(response).await?;
        envelope.into_data().ok_or(AttemptError::Retry(UpstreamError::MissingData))
    }

    async fn delete_once(&self, name: &str) -> AttemptResult<Option<bool>> {
        let response = self
            .client
            .delete(self.base_url.clone())
            .json(&DeleteEmployeeRequest { name })
            .send()
            .await?;
        let envelope: Response<bool> = decode(response).await?;
        Ok(envelope.into_data())
    }

    /// `{base}/{id}` with the id percent-encoded as a single path segment.
    fn item_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot fail: `new` rejects URLs that cannot be a base
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        url
    }
}

/// Check the status and parse the body as an envelope of `T`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> std::result::Result<Response<T>, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
