//! HTTP session for item pages, the wardrobe API, and photo downloads.

mod origin;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::Client;
use vinted_core::AppConfig;

use crate::error::ScraperError;
use crate::pace::Pacer;
use crate::types::WardrobeResponse;

pub use origin::{parse_item_url, ItemUrl};

/// One browsing session against a single Vinted site.
///
/// Wraps a `reqwest::Client` with a cookie store so the anonymous session
/// cookie handed out on the first page load is replayed on later calls.
/// Every request is preceded by a [`Pacer`] pause and carries the configured
/// `User-Agent` and `Accept-Language` headers. Requests are issued one at a
/// time; nothing here retries.
pub struct VintedClient {
    client: Client,
    origin: String,
    accept_language: String,
    pacer: Pacer,
    /// Set once any request to the site origin has succeeded.
    site_session: AtomicBool,
}

impl VintedClient {
    /// Creates a session for `origin` (e.g. `https://www.vinted.fr`).
    ///
    /// `timeout_secs` bounds each whole request, `connect_timeout_secs` only
    /// the connection phase.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        origin: &str,
        timeout_secs: u64,
        connect_timeout_secs: u64,
        user_agent: &str,
        accept_language: &str,
        pacer: Pacer,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .user_agent(user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            origin: origin.trim_end_matches('/').to_owned(),
            accept_language: accept_language.to_owned(),
            pacer,
            site_session: AtomicBool::new(false),
        })
    }

    /// Creates a session for `origin` with the timeouts, headers and pauses
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(origin: &str, config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            origin,
            config.request_timeout_secs,
            config.connect_timeout_secs,
            &config.user_agent,
            &config.accept_language,
            Pacer::new(config.pauses.clone()),
        )
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether a request to the site origin has already succeeded, so the
    /// anonymous session cookie is in the jar. Resource downloads from other
    /// hosts do not count.
    #[must_use]
    pub fn has_site_session(&self) -> bool {
        self.site_session.load(Ordering::Relaxed)
    }

    /// Fetches the markup of a page given its path relative to the origin.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: network or TLS failure.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    pub async fn fetch_page(&self, path: &str) -> Result<String, ScraperError> {
        let url = format!("{}{path}", self.origin);
        tracing::info!(url, "downloading item page");
        let response = self.get_site(&url).await?;
        Ok(response.text().await?)
    }

    /// Fetches the item JSON endpoint and returns the URL requested together
    /// with the raw body. Decoding is left to the caller so an unexpected
    /// body can still be reported verbatim.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn fetch_item_json(&self, item_id: u64) -> Result<(String, String), ScraperError> {
        let url = self.item_api_url(item_id);
        tracing::info!(url, "downloading item details");
        let body = self.get_site(&url).await?.text().await?;
        Ok((url, body))
    }

    /// Loads the site root once so the session picks up its anonymous cookie.
    ///
    /// Needed before calling the API when no page has been fetched yet.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn warm_up(&self) -> Result<(), ScraperError> {
        let url = format!("{}/", self.origin);
        tracing::debug!(url, "opening session");
        self.get_site(&url).await?;
        Ok(())
    }

    /// Downloads the raw bytes behind `url` (absolute).
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ScraperError> {
        tracing::info!(url, "downloading resource");
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Lists the ids of a seller's items, first page only, in response order.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] / [`ScraperError::UnexpectedStatus`]: request failed.
    /// - [`ScraperError::Deserialize`]: body is not the expected JSON shape.
    pub async fn fetch_wardrobe_item_ids(
        &self,
        seller_id: i64,
        per_page: u32,
    ) -> Result<Vec<u64>, ScraperError> {
        let url = self.wardrobe_url(seller_id, per_page);
        tracing::info!(url, seller_id, "downloading seller item list");
        let body = self.get_site(&url).await?.text().await?;
        let parsed = serde_json::from_str::<WardrobeResponse>(&body).map_err(|e| {
            ScraperError::Deserialize {
                context: format!("wardrobe of seller {seller_id}"),
                source: e,
            }
        })?;
        Ok(parsed.items.into_iter().map(|item| item.id).collect())
    }

    fn wardrobe_url(&self, seller_id: i64, per_page: u32) -> String {
        format!(
            "{}/api/v2/wardrobe/{seller_id}/items?page=1&per_page={per_page}&order=relevance",
            self.origin
        )
    }

    fn item_api_url(&self, item_id: u64) -> String {
        format!("{}/api/v2/items/{item_id}?localize=false", self.origin)
    }

    /// [`Self::get`] for URLs on the site origin; records the open session.
    async fn get_site(&self, url: &str) -> Result<reqwest::Response, ScraperError> {
        let response = self.get(url).await?;
        self.site_session.store(true, Ordering::Relaxed);
        Ok(response)
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, ScraperError> {
        self.pacer.pause().await;

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, &self.accept_language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
