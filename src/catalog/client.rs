use reqwest::Client;
use tracing::{debug, warn};

use super::error::CatalogError;
use super::raw::{RawDoc, RawWork, SearchResponse};

/// Number of search hits requested per query. The dashboard never pages.
pub const SEARCH_LIMIT: usize = 50;

const USER_AGENT: &str = concat!("openlibrary-dashboard/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over the catalog's search and works endpoints. Each call is a
/// single GET with no retries; timeouts are whatever the HTTP stack defaults to.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /search.json?q={query}&limit=50`. A response without a `docs`
    /// field yields an empty list.
    pub async fn search_books(&self, query: &str) -> Result<Vec<RawDoc>, CatalogError> {
        let url = format!("{}/search.json", self.base_url);
        let limit = SEARCH_LIMIT.to_string();
        debug!(%query, "searching catalog");

        let resp = self
            .http
            .get(&url)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?;

        let body = read_success_body(resp).await?;
        let parsed: SearchResponse = serde_json::from_str(&body).map_err(|err| {
            warn!(%query, error = %err, "search response was not valid JSON");
            err
        })?;

        Ok(parsed.docs.unwrap_or_default())
    }

    /// `GET /works/{work_id}.json`.
    pub async fn get_work_detail(&self, work_id: &str) -> Result<RawWork, CatalogError> {
        let url = format!("{}/works/{}.json", self.base_url, work_id);
        debug!(%work_id, "fetching work detail");

        let resp = self.http.get(&url).send().await?;
        let body = read_success_body(resp).await?;
        let work = serde_json::from_str(&body).map_err(|err| {
            warn!(%work_id, error = %err, "work response was not valid JSON");
            err
        })?;

        Ok(work)
    }
}

async fn read_success_body(resp: reqwest::Response) -> Result<String, CatalogError> {
    let status = resp.status();
    if !status.is_success() {
        warn!(url = %resp.url(), status = status.as_u16(), "catalog returned an error status");
        return Err(CatalogError::Http {
            status: status.as_u16(),
        });
    }
    Ok(resp.text().await?)
}
