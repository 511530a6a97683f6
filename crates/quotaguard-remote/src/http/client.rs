//! Shared HTTP client for the entitlement backend.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use quotaguard_core::config::remote::RemoteConfig;
use quotaguard_core::error::{AppError, ErrorKind};
use quotaguard_core::result::AppResult;

/// A configured `reqwest` client bound to the backend base URL.
///
/// Every failure, including timeouts and non-success statuses, surfaces as
/// an [`AppError`] of the caller-chosen kind.
#[derive(Debug, Clone)]
pub struct RemoteHttpClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl RemoteHttpClient {
    /// Build a client from configuration.
    pub fn new(config: &RemoteConfig) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid remote base URL '{}'", config.base_url),
                e,
            )
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    /// Resolve `segments` under the base URL, escaping each one.
    pub fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::configuration(format!("Base URL '{}' cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON body. `404` maps to `None`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        kind: ErrorKind,
    ) -> AppResult<Option<T>> {
        let url = self.url(segments)?;
        debug!(%url, "GET");
        let response = self
            .request(Method::GET, url.clone())
            .send()
            .await
            .map_err(|e| AppError::with_source(kind, format!("GET {url} failed"), e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response, kind)?;
        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| AppError::with_source(kind, format!("GET {url} returned an unreadable body"), e))
    }

    /// Send a JSON body with `method`, discarding the response body.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
        kind: ErrorKind,
    ) -> AppResult<()> {
        let url = self.url(segments)?;
        debug!(%url, %method, "Sending");
        let response = self
            .request(method.clone(), url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::with_source(kind, format!("{method} {url} failed"), e))?;
        check_status(response, kind)?;
        Ok(())
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

fn check_status(response: reqwest::Response, kind: ErrorKind) -> AppResult<reqwest::Response> {
    let url = response.url().clone();
    response
        .error_for_status()
        .map_err(|e| AppError::with_source(kind, format!("{url} answered with an error status"), e))
}
