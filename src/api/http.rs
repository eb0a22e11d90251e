use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ListApi, ListKind, PageRequest};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::Page;

/// `ListApi` over HTTP: `GET <base><path>?kind=..&page=..&limit=12&<filters>`.
#[derive(Clone)]
pub struct HttpListApi {
    client: reqwest::Client,
    base_url: String,
    profiles_path: String,
    teams_path: String,
}

impl HttpListApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Self::with_client(client, &config.base_url, &config.profiles_path, &config.teams_path)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        profiles_path: &str,
        teams_path: &str,
    ) -> ApiResult<Self> {
        // Fail early on a malformed base rather than on the first request.
        Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            profiles_path: normalize_path(profiles_path),
            teams_path: normalize_path(teams_path),
        })
    }

    /// Endpoint URL for a request, query included.
    pub fn request_url(&self, request: &PageRequest) -> ApiResult<Url> {
        let path = match request.kind {
            ListKind::Freelancer | ListKind::Agency => &self.profiles_path,
            ListKind::Team => &self.teams_path,
        };
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        url.query_pairs_mut().extend_pairs(request.query_pairs());
        Ok(url)
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[async_trait]
impl<T> ListApi<T> for HttpListApi
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch_page(&self, request: &PageRequest) -> ApiResult<Page<T>> {
        let url = self.request_url(request)?;
        debug!("Fetching {} page {} from {}", request.kind, request.page, url);

        let response: reqwest::Response = self.client.get(url).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_status(status, &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}
