pub mod organizations;
pub mod sm;

use crate::error::{Result, SmTagError};
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DASHBOARD_API_BASE: &str = "https://api.meraki.com/api/v1";

/// Largest page size the Dashboard API accepts on list endpoints
const PER_PAGE: u32 = 1000;

/// Default retry configuration
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;
const MAX_BACKOFF_MS: u64 = 30000;
const JITTER_FACTOR: f64 = 0.3; // +/- 30% jitter

/// Calculate backoff with jitter for exponential backoff
fn calculate_backoff_with_jitter(attempt: u32) -> Duration {
    let base_backoff = INITIAL_BACKOFF_MS * 2u64.pow(attempt);
    let capped_backoff = base_backoff.min(MAX_BACKOFF_MS);

    let jitter_range = (capped_backoff as f64 * JITTER_FACTOR) as u64;
    let jitter = if jitter_range > 0 {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::time::SystemTime::now().hash(&mut hasher);
        (hasher.finish() % (jitter_range * 2)) as i64 - jitter_range as i64
    } else {
        0
    };

    let final_backoff = (capped_backoff as i64 + jitter).max(100) as u64;
    Duration::from_millis(final_backoff)
}

/// Meraki Dashboard API client with retry support
pub struct DashboardClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl DashboardClient {
    /// `base_url` is the public dashboard, a regional cloud or a mock server
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Make a POST request to the Dashboard API with retry for transient failures
    pub async fn post<T: Serialize, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<R> {
        let url = self.url(endpoint);
        let resp = self.send_with_retry(Method::POST, &url, Some(body)).await?;
        Ok(resp.json::<R>().await?)
    }

    /// Fetch every page of a list endpoint
    ///
    /// Follows the `Link: <...>; rel=next` header until the last page and
    /// concatenates the JSON arrays in the order the API returns them.
    pub async fn get_all_pages<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        let mut all_items: Vec<T> = Vec::new();
        let mut current_url = with_per_page(&self.url(endpoint));
        let mut page_count = 0;

        loop {
            let resp = self
                .send_with_retry::<()>(Method::GET, &current_url, None)
                .await?;
            let next = next_page_link(resp.headers());
            let page: Vec<T> = resp.json().await?;
            page_count += 1;
            tracing::debug!("Page {} of {}: {} items", page_count, endpoint, page.len());
            all_items.extend(page);

            match next {
                Some(next) => current_url = next,
                None => break,
            }
        }

        Ok(all_items)
    }

    /// Send a request, retrying on 429, 5xx and connection errors
    async fn send_with_retry<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response> {
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            let mut request = self
                .client
                .request(method.clone(), url)
                .bearer_auth(&self.api_key);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                        && attempt < MAX_RETRIES - 1
                    {
                        let retry_after = resp
                            .headers()
                            .get("Retry-After")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(INITIAL_BACKOFF_MS / 1000);

                        tracing::warn!(
                            "Rate limited (429). Retrying in {} seconds... (attempt {}/{})",
                            retry_after,
                            attempt + 1,
                            MAX_RETRIES
                        );
                        tokio::time::sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }

                    if status.is_server_error() && attempt < MAX_RETRIES - 1 {
                        let wait_time = calculate_backoff_with_jitter(attempt);
                        tracing::warn!(
                            "Server error ({}). Retrying in {:?}... (attempt {}/{})",
                            status,
                            wait_time,
                            attempt + 1,
                            MAX_RETRIES
                        );
                        tokio::time::sleep(wait_time).await;
                        continue;
                    }

                    if !status.is_success() {
                        let error_text = resp.text().await.unwrap_or_default();
                        let enhanced_error =
                            crate::error::enhance_dashboard_error(status.as_u16(), &error_text);
                        return Err(SmTagError::DashboardApiError(format!(
                            "HTTP {}: {}",
                            status, enhanced_error
                        )));
                    }

                    return Ok(resp);
                }
                Err(e) => {
                    if attempt < MAX_RETRIES - 1 {
                        let wait_time = calculate_backoff_with_jitter(attempt);
                        tracing::warn!(
                            "Connection error: {}. Retrying in {:?}... (attempt {}/{})",
                            e,
                            wait_time,
                            attempt + 1,
                            MAX_RETRIES
                        );
                        tokio::time::sleep(wait_time).await;
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.map(|e| e.into()).unwrap_or_else(|| {
            SmTagError::DashboardApiError(format!(
                "{} {} failed after {} retries",
                method, url, MAX_RETRIES
            ))
        }))
    }
}

fn with_per_page(url: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}perPage={}", url, sep, PER_PAGE)
}

/// Extract the `rel=next` target from an RFC 5988 Link header
fn next_page_link(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts
            .next()?
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>');
        let is_next = parts.any(|p| {
            let p = p.trim();
            p == "rel=next" || p == "rel=\"next\""
        });
        is_next.then(|| target.to_string())
    })
}
