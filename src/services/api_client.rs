use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::page::{parse_links, Page};

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// HTTP client for the photo organizer REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        // request paths are joined onto the base as-is
        let mut base_url = config.api_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(ApiClient {
            http: builder.build()?,
            base_url,
            token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "api request");

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and turns non-2xx statuses into errors.
    pub(crate) async fn send(&self, builder: RequestBuilder, resource: &str) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!(%status, resource, "api request failed");
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(resource.to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Status { status, body })
    }

    pub(crate) async fn json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        let response = self.send(builder, resource).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn page<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> Result<Page<T>> {
        let response = self.send(builder, resource).await?;
        let (total_count, links) = pagination_headers(response.headers())?;
        let items: Vec<T> = response.json().await?;

        Ok(Page {
            items,
            total_count,
            links,
        })
    }
}

fn pagination_headers(
    headers: &HeaderMap,
) -> Result<(Option<u64>, std::collections::BTreeMap<String, u32>)> {
    let total_count = match headers.get(TOTAL_COUNT_HEADER) {
        Some(value) => Some(
            value
                .to_str()
                .ok()
                .and_then(|v| v.trim().parse::<u64>().ok())
                .ok_or_else(|| Error::InvalidHeader {
                    name: TOTAL_COUNT_HEADER,
                    reason: format!("{value:?} is not a count"),
                })?,
        ),
        None => None,
    };

    let links = match headers.get(LINK) {
        Some(value) => parse_links(value.to_str().map_err(|e| Error::InvalidHeader {
            name: "link",
            reason: e.to_string(),
        })?)?,
        None => Default::default(),
    };

    Ok((total_count, links))
}
