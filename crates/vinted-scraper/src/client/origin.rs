//! Item URL parsing: site locale and item id.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ScraperError;

/// Matched against the host only, so `vinted.` elsewhere in the URL is ignored.
static TLD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9-]+\.)*vinted\.([a-z]+(?:\.[a-z]+)*)$").expect("valid tld regex")
});
static ITEM_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\d+)(?:[-/?#]|$)").expect("valid item id regex"));

/// A listing URL broken down into the parts the client needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUrl {
    url: String,
    tld: String,
    item_id: u64,
    path: String,
}

impl ItemUrl {
    /// Canonical page URL for an item on the given site, used when an item
    /// is known only by id (e.g. from a seller's wardrobe).
    #[must_use]
    pub fn for_item(tld: &str, item_id: u64) -> Self {
        let path = format!("/items/{item_id}");
        Self {
            url: format!("https://www.vinted.{tld}{path}"),
            tld: tld.to_owned(),
            item_id,
            path,
        }
    }

    /// The URL as supplied by the user.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Site top-level domain, e.g. `fr` or `co.uk`.
    #[must_use]
    pub fn tld(&self) -> &str {
        &self.tld
    }

    #[must_use]
    pub fn item_id(&self) -> u64 {
        self.item_id
    }

    /// Path and query of the page, relative to the site origin.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `https://www.vinted.<tld>`
    #[must_use]
    pub fn origin(&self) -> String {
        format!("https://www.vinted.{}", self.tld)
    }
}

/// Parses a listing URL such as `https://www.vinted.fr/items/123456-foobar`.
///
/// No network access happens here, so malformed input is rejected before any
/// request is made.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidItemUrl`] if the URL does not parse, has no
/// `vinted.<tld>` host segment, or has no numeric item id segment.
pub fn parse_item_url(url: &str) -> Result<ItemUrl, ScraperError> {
    let invalid = |reason: &str| ScraperError::InvalidItemUrl {
        url: url.to_owned(),
        reason: reason.to_owned(),
    };

    let parsed = reqwest::Url::parse(url).map_err(|e| invalid(&e.to_string()))?;

    let tld = parsed
        .host_str()
        .and_then(|host| TLD_RE.captures(host))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned())
        .ok_or_else(|| invalid("unable to find the vinted site domain"))?;

    let item_id = ITEM_ID_RE
        .captures(parsed.path())
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .ok_or_else(|| invalid("unable to find the item id"))?;

    let path = match parsed.query() {
        Some(query) => format!("{}?{query}", parsed.path()),
        None => parsed.path().to_owned(),
    };

    Ok(ItemUrl {
        url: url.to_owned(),
        tld,
        item_id,
        path,
    })
}
