//! HTTP client for the OpenProject v3 API
//!
//! A thin wrapper over reqwest that attaches token authentication and HAL
//! content negotiation to every request, decodes the envelopes through
//! `opcli_core`, and maps HTTP failures onto typed errors. No retries, no
//! caching; each operation is a single round trip except
//! [`Client::assign_to_user`], which reads the current concurrency token
//! before writing.

use std::time::Duration;

use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};

use opcli_core::pagination::{paginate, Page};
use opcli_core::work_package::{
    build_assign_payload, build_create_payload, CreatedWorkPackage, User, WorkPackageListResponse,
    WorkPackageResponse,
};

use crate::config::Config;

/// Username literal the OpenProject API expects for token authentication.
const BASIC_AUTH_USER: &str = "apikey";

/// Upper bound on a single collection fetch.
///
/// Listing is done in one request and paginated locally, so projects with
/// more work packages than this are truncated; `list_all` logs a warning
/// when the server reports a larger total.
pub const FULL_FETCH_PAGE_SIZE: usize = 500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("work package #{id} not found")]
    NotFound { id: u64 },

    #[error("server rejected the request [{status}]: {body}")]
    ServerRejected { status: StatusCode, body: String },

    #[error("failed to assign work package #{id} to user {assignee_id} [{status}]")]
    AssignRejected {
        id: u64,
        assignee_id: u64,
        status: StatusCode,
    },

    #[error("the API token is not usable in an Authorization header")]
    InvalidToken,
}

/// Client for one OpenProject server and project.
///
/// Construction bakes the credentials into the underlying reqwest client;
/// after that the client is immutable and every call builds a fresh request.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    project: String,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{BASIC_AUTH_USER}:{}", config.api_key));

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {credentials}"))
                .map_err(|_| Error::InvalidToken)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/hal+json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project: config.project.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Fetch a single work package by id.
    pub async fn get_work_package(&self, id: u64) -> Result<WorkPackageResponse, Error> {
        let response = self
            .request(Method::GET, &format!("/api/v3/work_packages/{id}"))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id });
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServerRejected { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the project's entire work-package collection in one request.
    pub async fn list_all(&self) -> Result<Vec<WorkPackageResponse>, Error> {
        let path = format!(
            "/api/v3/projects/{}/work_packages?pageSize={FULL_FETCH_PAGE_SIZE}",
            urlencoding::encode(&self.project)
        );

        let response = self.request(Method::GET, &path).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServerRejected { status, body });
        }

        let body = response.text().await?;
        let result: WorkPackageListResponse = serde_json::from_str(&body)?;

        if result.total > result.embedded.elements.len() {
            log::warn!(
                "project '{}' has {} work packages but only the first {} were fetched",
                self.project,
                result.total,
                result.embedded.elements.len()
            );
        }

        Ok(result.embedded.elements)
    }

    /// Fetch the full collection and slice out one page locally.
    pub async fn list_page(
        &self,
        page: usize,
        page_size: usize,
    ) -> Result<Page<WorkPackageResponse>, Error> {
        let all = self.list_all().await?;
        Ok(paginate(all, page, page_size))
    }

    /// Resolve the authenticated user.
    pub async fn current_user(&self) -> Result<User, Error> {
        let response = self.request(Method::GET, "/api/v3/users/me").send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServerRejected { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Create a work package in the configured project.
    ///
    /// Any status other than 200 or 201 surfaces the response body verbatim
    /// so server-side validation messages reach the user.
    pub async fn create_work_package(
        &self,
        subject: &str,
        description: &str,
        type_name: Option<&str>,
    ) -> Result<CreatedWorkPackage, Error> {
        let path = format!(
            "/api/v3/projects/{}/work_packages",
            urlencoding::encode(&self.project)
        );
        let payload = build_create_payload(subject, description, type_name);

        let response = self
            .request(Method::POST, &path)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServerRejected { status, body });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Re-assign a work package, presenting the concurrency token the caller
    /// read. No implicit re-read happens here; a stale token is rejected by
    /// the server and surfaced as [`Error::AssignRejected`].
    pub async fn update_assignee(
        &self,
        id: u64,
        lock_version: u64,
        assignee_id: u64,
    ) -> Result<(), Error> {
        let payload = build_assign_payload(lock_version, assignee_id);

        let response = self
            .request(Method::PATCH, &format!("/api/v3/work_packages/{id}"))
            .json(&payload)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(Error::AssignRejected {
                id,
                assignee_id,
                status: response.status(),
            });
        }

        Ok(())
    }

    /// Read-then-write assignment.
    ///
    /// Fetches the work package for its current lock version and applies the
    /// update immediately after. A concurrent edit between the two calls
    /// makes the write fail; that failure is surfaced, never retried.
    pub async fn assign_to_user(&self, id: u64, assignee_id: u64) -> Result<(), Error> {
        let wp = self.get_work_package(id).await?;
        self.update_assignee(id, wp.lock_version, assignee_id).await
    }
}
