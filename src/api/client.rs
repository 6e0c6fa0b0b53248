// Backend HTTP client.
// Handles the session cookie jar, timeouts, and status-to-error mapping.

use std::sync::Arc;

use reqwest::{
    Client, Response, StatusCode, Url,
    cookie::Jar,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::Config;
use crate::error::{CinderError, Result};

/// Client for the dashboard backend. Every request carries the session jar.
pub struct BackendClient {
    client: Client,
    base: Url,
}

impl BackendClient {
    /// Create a client for the configured backend origin.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("cinder/", env!("CARGO_PKG_VERSION"))),
        );

        let jar = Jar::default();
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(cookie, &config.backend_url);
        }

        let client = Client::builder()
            .default_headers(headers)
            .cookie_provider(Arc::new(jar))
            .timeout(config.request_timeout)
            .build()
            .map_err(CinderError::Api)?;

        Ok(Self {
            client,
            base: config.backend_url.clone(),
        })
    }

    /// Backend origin this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        build_endpoint(&self.base, segments)
    }

    /// Make a GET request to the backend.
    pub async fn get(&self, segments: &[&str]) -> Result<Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        check_response(response)
    }

    /// Make a POST request with an empty body.
    pub async fn post(&self, segments: &[&str]) -> Result<Response> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "POST");
        let response = self.client.post(url).send().await.map_err(map_transport)?;
        check_response(response)
    }
}

fn build_endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CinderError::Config(format!("{} cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Convert reqwest failures, keeping timeouts distinct.
pub(crate) fn map_transport(error: reqwest::Error) -> CinderError {
    if error.is_timeout() {
        CinderError::Timeout
    } else {
        CinderError::Api(error)
    }
}

/// Check response status and convert errors.
fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    tracing::debug!(%status, url = %response.url(), "backend returned an error status");
    match status {
        StatusCode::UNAUTHORIZED => Err(CinderError::Unauthorized),
        StatusCode::NOT_FOUND => Err(CinderError::NotFound(response.url().path().to_string())),
        status => Err(CinderError::Status(status)),
    }
}
