use std::{sync::Arc, time::Duration};

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("backend returned {status} for {method} {path}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },

    #[error("backend request failed")]
    Transport(#[from] reqwest::Error),

    #[error("could not decode backend response for {path}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl UpstreamError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// HTTP client bound to one Loumo backend.
#[derive(Debug, Clone)]
pub struct LoumoClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl LoumoClient {
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: token.map(Arc::from),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        Self::new(&config.api_url, config.api_token.clone(), config.api_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn asset_url(&self, path: &str) -> String {
        resolve_asset_url(&self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let request = self.request(Method::GET, path);
        let response = self.execute(request, &Method::GET, path).await?;
        decode(response, path).await
    }

    pub async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, UpstreamError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method.clone(), path).json(body);
        let response = self.execute(request, &method, path).await?;
        decode(response, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), UpstreamError> {
        let request = self.request(Method::DELETE, path);
        self.execute(request, &Method::DELETE, path).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> Result<reqwest::Response, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(%method, path, %status, "backend call");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            method: method.clone(),
            path: path.to_string(),
            status,
            body,
        })
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    path: &str,
) -> Result<T, UpstreamError> {
    response.json::<T>().await.map_err(|source| UpstreamError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Joins a backend-relative asset path onto the base URL. Absolute URLs pass
/// through untouched.
pub fn resolve_asset_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
