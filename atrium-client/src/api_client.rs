//! HTTP access to the catalog service.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;

use atrium_core::api::routes::{fields, v1};
use atrium_model::{ApiErrorBody, CatalogEntry, UploadResponse};

use crate::{error::ClientError, source::CatalogSource};

/// Image plus the fields the upload form collects.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Original file name, used for the stored extension.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Image contents.
    pub bytes: Vec<u8>,
    /// Free text shown with the image.
    pub description: String,
    /// Category name, omitted from the form when `None`.
    pub category: Option<String>,
}

/// HTTP client for the catalog service
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. A missing scheme defaults to
    /// `http://` and trailing slashes are dropped.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = normalize_base_url(base_url.into());
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        info!("[ApiClient] Creating API client with base URL: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Join `path` onto the base URL. Absolute URLs pass through.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    /// Normalized base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// WebSocket URL of the event stream.
    pub fn events_url(&self) -> String {
        let http = self.build_url(v1::events::STREAM);
        if let Some(rest) = http.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = http.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            http
        }
    }

    /// Fetch the full catalog.
    pub async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, ClientError> {
        let url = self.build_url(v1::images::COLLECTION);
        debug!("[ApiClient] GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::decode(response).await
    }

    /// Submit one image with its description and optional category.
    pub async fn upload(
        &self,
        request: UploadRequest,
    ) -> Result<UploadResponse, ClientError> {
        let url = self.build_url(v1::images::COLLECTION);
        debug!(
            "[ApiClient] POST {} ({} bytes, {})",
            url,
            request.bytes.len(),
            request.content_type
        );

        let file = Part::bytes(request.bytes)
            .file_name(request.file_name)
            .mime_str(&request.content_type)?;

        let mut form = Form::new()
            .part(fields::FILE, file)
            .text(fields::DESCRIPTION, request.description);
        if let Some(category) = request.category {
            form = form.text(fields::CATEGORY, category);
        }

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, kind) = match serde_json::from_str::<ApiErrorBody>(&text)
        {
            Ok(body) => (body.error, body.kind),
            Err(_) => (text, None),
        };
        warn!("[ApiClient] request failed with {}: {}", status, message);

        Err(ClientError::Server {
            status: status.as_u16(),
            message,
            kind,
        })
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>, ClientError> {
        self.list_catalog().await
    }
}

fn normalize_base_url(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/').to_string();
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed
        } else {
            format!("http://{}", trimmed)
        };
    if with_scheme != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, with_scheme
        );
    }
    with_scheme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_scheme_and_loses_trailing_slash() {
        let client = ApiClient::new("localhost:3001/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[test]
    fn build_url_joins_paths_once() {
        let client = ApiClient::new("http://example.test").unwrap();
        assert_eq!(
            client.build_url(v1::images::COLLECTION),
            "http://example.test/api/v1/images"
        );
        assert_eq!(
            client.build_url("uploads/a.png"),
            "http://example.test/uploads/a.png"
        );
        assert_eq!(
            client.build_url("https://cdn.test/x.png"),
            "https://cdn.test/x.png"
        );
    }

    #[test]
    fn events_url_switches_scheme() {
        let plain = ApiClient::new("http://example.test").unwrap();
        assert_eq!(plain.events_url(), "ws://example.test/api/v1/events");

        let tls = ApiClient::new("https://example.test").unwrap();
        assert_eq!(tls.events_url(), "wss://example.test/api/v1/events");
    }
}
