use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{ReportSource, Result, ServiceError};
use crate::config::Credentials;
use crate::models::{Application, ApplicationList, RawReport, ReportDescriptor};

/// HTTP client for one Report Service instance.
///
/// Holds the base URL and credentials used by every request of a run.
pub struct ServiceClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl ServiceClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("iq-license-bom/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ServiceError::Request {
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Resolve a service-relative path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
    }

    /// Send `request` once and decode a JSON body. `url` is only used for errors.
    async fn fetch<T: DeserializeOwned>(&self, url: &str, request: RequestBuilder) -> Result<T> {
        tracing::debug!(url, "GET");

        let request_error = |source: reqwest::Error| ServiceError::Request {
            url: url.to_string(),
            source,
        };

        let response = request.send().await.map_err(request_error)?;
        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ServiceError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ReportSource for ServiceClient {
    async fn applications(&self) -> Result<Vec<Application>> {
        let url = self.url("api/v2/applications");
        let list: ApplicationList = self.fetch(&url, self.get(&url)).await?;
        if list.applications.is_empty() {
            return Err(ServiceError::NoApplications { url });
        }
        Ok(list.applications)
    }

    async fn applications_by_public_id(&self, public_id: &str) -> Result<Vec<Application>> {
        let url = self.url("api/v2/applications");
        let request = self.get(&url).query(&[("publicId", public_id)]);
        let list: ApplicationList = self
            .fetch(&format!("{}?publicId={}", url, public_id), request)
            .await?;
        Ok(list.applications)
    }

    async fn reports(&self, application: &Application) -> Result<Vec<ReportDescriptor>> {
        let url = self.url(&format!("api/v2/reports/applications/{}", application.id));
        self.fetch(&url, self.get(&url)).await
    }

    async fn report_data(&self, report: &ReportDescriptor) -> Result<RawReport> {
        let url = self.url(&report.report_data_url);
        self.fetch(&url, self.get(&url)).await
    }
}
