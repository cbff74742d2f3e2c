use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use appguide_core::config::ApiSettings;
use appguide_core::error::{Error, Result};
use appguide_core::traits::{ContentSearcher, ModuleFetcher};
use appguide_core::types::{ContentSearchResponse, Module, ModuleListResponse};

pub const MODULES_PATH: &str = "modules";
pub const CONTENT_SEARCH_PATH: &str = "contents/search";

/// Thin JSON client over the App Guide REST API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = settings.bearer_token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::InvalidConfig(format!("api.token is not a valid header value: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout())
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            timeout_ms: settings.timeout_ms,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.request_error(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Request(format!("GET {} returned {}", url, status)));
        }
        let body = response.bytes().await.map_err(|e| self.request_error(&url, e))?;
        serde_json::from_slice(&body).map_err(|e| Error::Decode(format!("GET {}: {}", url, e)))
    }

    fn request_error(&self, url: &str, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout(self.timeout_ms)
        } else {
            Error::Request(format!("GET {}: {}", url, e))
        }
    }
}

#[async_trait]
impl ModuleFetcher for ApiClient {
    async fn fetch_modules(&self) -> Result<Vec<Module>> {
        let body: ModuleListResponse = self.get_json(MODULES_PATH, &[]).await?;
        Ok(body.into_modules())
    }
}

#[async_trait]
impl ContentSearcher for ApiClient {
    async fn search_contents(&self, query: &str) -> Result<ContentSearchResponse> {
        self.get_json(CONTENT_SEARCH_PATH, &[("q", query)]).await
    }
}
