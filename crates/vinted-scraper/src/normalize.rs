//! Read-only view over a raw item record.
//!
//! Records come in two shapes: the component-tag document nests everything
//! under `item` (`item.title`, `item.user.login`), while streamed pages hand
//! back the item object itself (`title`, `seller_id`, often no `user`). Every
//! accessor probes the nested location first and the flat one second, so
//! callers never need to know which page generation produced the record.

use serde_json::Value;
use vinted_core::{ItemSummary, LastLoginPolicy};

use crate::error::ScraperError;

/// Stable accessors over a raw item record. Never mutates the record.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    data: Value,
}

impl ItemDetails {
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// The record exactly as it was decoded.
    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.data
    }

    #[must_use]
    pub fn title(&self) -> String {
        self.probe(&["title"]).map(text_of).unwrap_or_default()
    }

    /// Line breaks are kept verbatim.
    #[must_use]
    pub fn description(&self) -> String {
        self.probe(&["description"]).map(text_of).unwrap_or_default()
    }

    /// Seller login, or an empty string when the record has no seller object.
    #[must_use]
    pub fn seller(&self) -> String {
        self.probe(&["user", "login"]).map(text_of).unwrap_or_default()
    }

    /// Seller id from `user.id`, falling back to a top-level `seller_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MissingField`] if neither field holds an integer.
    pub fn seller_id(&self) -> Result<i64, ScraperError> {
        [&["user", "id"][..], &["seller_id"][..]]
            .into_iter()
            .find_map(|path| self.probe(path).and_then(integer_of))
            .ok_or(ScraperError::MissingField { field: "seller id" })
    }

    /// Seller last-login timestamp.
    ///
    /// Some payloads spell the key `last_loged_on_ts`; both spellings are
    /// accepted and the first non-empty value wins.
    ///
    /// # Errors
    ///
    /// Under [`LastLoginPolicy::Strict`], returns [`ScraperError::MissingField`]
    /// when neither spelling is present. Lenient policy yields `""` instead.
    pub fn seller_last_logged_in(&self, policy: LastLoginPolicy) -> Result<String, ScraperError> {
        let found = ["last_logged_on_ts", "last_loged_on_ts"]
            .into_iter()
            .filter_map(|key| self.probe(&["user", key]))
            .map(text_of)
            .find(|ts| !ts.is_empty());

        match (found, policy) {
            (Some(ts), _) => Ok(ts),
            (None, LastLoginPolicy::Lenient) => Ok(String::new()),
            (None, LastLoginPolicy::Strict) => Err(ScraperError::MissingField {
                field: "seller last logged in",
            }),
        }
    }

    /// Full-size photo URLs in source order, one per photo entry. Duplicates
    /// are kept. A record without a `photos` array has no photos.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::MissingField`] if any photo entry lacks a
    /// string `full_size_url`, since skipping it would shift the index of
    /// every later photo.
    pub fn full_size_photo_urls(&self) -> Result<Vec<String>, ScraperError> {
        let Some(photos) = self.probe(&["photos"]).and_then(Value::as_array) else {
            return Ok(Vec::new());
        };

        photos
            .iter()
            .enumerate()
            .map(|(index, photo)| {
                photo
                    .get("full_size_url")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| {
                        tracing::warn!(index, "photo entry has no full_size_url");
                        ScraperError::MissingField {
                            field: "photo full_size_url",
                        }
                    })
            })
            .collect()
    }

    /// Seller avatar URL; `None` when the photo object is missing, null, or
    /// carries an empty URL.
    #[must_use]
    pub fn seller_photo_url(&self) -> Option<String> {
        self.probe(&["user", "photo", "full_size_url"])
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_owned)
    }

    /// Assembles the `item_summary` record for this item.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::seller_id`] and [`Self::seller_last_logged_in`] failures.
    pub fn summary(
        &self,
        source: &str,
        policy: LastLoginPolicy,
    ) -> Result<ItemSummary, ScraperError> {
        Ok(ItemSummary {
            source: source.to_owned(),
            title: self.title(),
            description: self.description(),
            seller: self.seller(),
            seller_id: self.seller_id()?,
            last_logged_in: self.seller_last_logged_in(policy)?,
        })
    }

    /// The nested `item` object (when present) followed by the record root.
    fn scopes(&self) -> impl Iterator<Item = &Value> {
        self.data
            .get("item")
            .filter(|item| item.is_object())
            .into_iter()
            .chain(std::iter::once(&self.data))
    }

    /// Resolves `path` in each scope and returns the first non-null hit.
    fn probe(&self, path: &[&str]) -> Option<&Value> {
        self.scopes().find_map(|scope| {
            path.iter()
                .try_fold(scope, |node, key| node.get(key))
                .filter(|v| !v.is_null())
        })
    }
}

/// Renders a scalar as text the way it appears in the summary file.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
