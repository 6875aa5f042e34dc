//! Item retrieval pipeline: page, record, summary, then assets.
//!
//! Everything runs sequentially on the caller's task. The first failed
//! request aborts the whole retrieval and nothing collected so far is
//! returned; writing results to disk is left to the caller.

use serde_json::Value;
use vinted_core::{ItemSummary, LastLoginPolicy};

use crate::client::{ItemUrl, VintedClient};
use crate::error::ScraperError;
use crate::locator::locate_item_record;
use crate::normalize::ItemDetails;

/// Where the item record comes from.
#[derive(Debug, Clone)]
pub enum PageSource {
    /// Fetch `<origin><path>` through the client.
    Remote,
    /// Markup saved earlier, used in place of a fetch.
    Saved(String),
    /// Open a session on the site root, then read the item JSON endpoint
    /// `/api/v2/items/<id>?localize=false` instead of any page markup.
    Api,
}

#[derive(Debug, Clone, Copy)]
pub struct RetrieveOptions {
    /// Also download the seller avatar as `seller.jpg`.
    pub seller_photo: bool,
    /// Also download the photos of every other item the seller lists.
    pub all_seller_items: bool,
    /// When the page markup holds no record, try the item JSON endpoint
    /// before giving up.
    pub api_fallback: bool,
    pub wardrobe_page_size: u32,
    pub last_login_policy: LastLoginPolicy,
}

/// A downloaded binary resource and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub filename: String,
    pub url: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct Retrieval {
    pub details: ItemDetails,
    pub summary: ItemSummary,
    pub assets: Vec<Asset>,
}

/// Retrieves one listing and its assets.
///
/// Photos are named `photo_<index>.jpg` in source order. Before the first
/// API call the client opens a session on the site root unless a site page
/// was already fetched. With
/// [`RetrieveOptions::all_seller_items`], each other item in the seller's
/// wardrobe is resolved through its own page and its photos are named
/// `photo_<index>_<item_id>.jpg`.
///
/// # Errors
///
/// - [`ScraperError::ItemDetailsNotFound`]: the page (main or other item)
///   held no recognizable record; the error carries the markup.
/// - [`ScraperError::MissingField`]: the record has no seller id, a photo
///   entry has no URL, or no last-login timestamp under the strict policy.
/// - Any transport error from the client, unretried.
pub async fn retrieve(
    client: &VintedClient,
    item_url: &ItemUrl,
    source: PageSource,
    options: &RetrieveOptions,
) -> Result<Retrieval, ScraperError> {
    let details = match source {
        PageSource::Remote => {
            let html = client.fetch_page(item_url.path()).await?;
            resolve_or_fall_back(client, item_url, html, options).await?
        }
        PageSource::Saved(html) => resolve_or_fall_back(client, item_url, html, options).await?,
        PageSource::Api => {
            client.warm_up().await?;
            fetch_api_details(client, item_url).await?
        }
    };
    let summary = details.summary(item_url.url(), options.last_login_policy)?;

    let mut assets = Vec::new();
    for (index, url) in details.full_size_photo_urls()?.into_iter().enumerate() {
        assets.push(download(client, url, format!("photo_{index}.jpg")).await?);
    }

    if options.seller_photo {
        match details.seller_photo_url() {
            Some(url) => assets.push(download(client, url, "seller.jpg".to_owned()).await?),
            None => tracing::info!(seller = %summary.seller, "seller has no profile photo"),
        }
    }

    if options.all_seller_items {
        if !client.has_site_session() {
            client.warm_up().await?;
        }
        let item_ids = client
            .fetch_wardrobe_item_ids(summary.seller_id, options.wardrobe_page_size)
            .await?;
        tracing::info!(
            seller_id = summary.seller_id,
            count = item_ids.len(),
            "retrieving seller items"
        );

        // The wardrobe lists the current item too; its photos are already
        // stored as photo_<index>.jpg, so it is not fetched a second time.
        for item_id in item_ids
            .into_iter()
            .filter(|id| *id != item_url.item_id())
        {
            let other_url = ItemUrl::for_item(item_url.tld(), item_id);
            let html = client.fetch_page(other_url.path()).await?;
            let other = resolve_details(html, other_url.url())?;
            for (index, url) in other.full_size_photo_urls()?.into_iter().enumerate() {
                let filename = format!("photo_{index}_{item_id}.jpg");
                assets.push(download(client, url, filename).await?);
            }
        }
    }

    Ok(Retrieval {
        details,
        summary,
        assets,
    })
}

/// Locates the record in `html` and wraps it, or hands the markup back
/// inside [`ScraperError::ItemDetailsNotFound`].
fn resolve_details(html: String, url: &str) -> Result<ItemDetails, ScraperError> {
    match locate_item_record(&html) {
        Some(record) => Ok(ItemDetails::new(record)),
        None => {
            tracing::warn!(url, bytes = html.len(), "no item record found in page");
            Err(ScraperError::ItemDetailsNotFound {
                url: url.to_owned(),
                body: html,
            })
        }
    }
}

/// Like [`resolve_details`], but with `api_fallback` set a page without a
/// record is retried through the item JSON endpoint. If that fails too, the
/// original page error is returned so the markup can still be inspected.
async fn resolve_or_fall_back(
    client: &VintedClient,
    item_url: &ItemUrl,
    html: String,
    options: &RetrieveOptions,
) -> Result<ItemDetails, ScraperError> {
    let not_found = match resolve_details(html, item_url.url()) {
        Err(err @ ScraperError::ItemDetailsNotFound { .. }) if options.api_fallback => err,
        other => return other,
    };

    tracing::info!(item_id = item_url.item_id(), "falling back to the item API");
    let attempt = async {
        if !client.has_site_session() {
            client.warm_up().await?;
        }
        fetch_api_details(client, item_url).await
    };
    match attempt.await {
        Ok(details) => Ok(details),
        Err(e) => {
            tracing::warn!(error = %e, "item API fallback failed");
            Err(not_found)
        }
    }
}

/// Reads `{"item": {...}}` from the item JSON endpoint. The whole response
/// is kept as the record, matching the component-page shape.
async fn fetch_api_details(
    client: &VintedClient,
    item_url: &ItemUrl,
) -> Result<ItemDetails, ScraperError> {
    let (url, body) = client.fetch_item_json(item_url.item_id()).await?;
    match serde_json::from_str::<Value>(&body) {
        Ok(record) if record.get("item").is_some_and(Value::is_object) => {
            Ok(ItemDetails::new(record))
        }
        Ok(_) => {
            tracing::warn!(url = %url, "item API response has no item object");
            Err(ScraperError::ItemDetailsNotFound { url, body })
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "item API response is not JSON");
            Err(ScraperError::ItemDetailsNotFound { url, body })
        }
    }
}

async fn download(
    client: &VintedClient,
    url: String,
    filename: String,
) -> Result<Asset, ScraperError> {
    let bytes = client.fetch_bytes(&url).await?;
    Ok(Asset {
        filename,
        url,
        bytes,
    })
}
