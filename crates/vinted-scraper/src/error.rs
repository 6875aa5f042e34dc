use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid item URL \"{url}\": {reason}")]
    InvalidItemUrl { url: String, reason: String },

    /// No embedded fragment of the page yielded an item record. `body` is the
    /// markup that was searched, kept so the caller can save it for inspection.
    #[error("item details not found in page {url}")]
    ItemDetailsNotFound { url: String, body: String },

    #[error("required field missing from item record: {field}")]
    MissingField { field: &'static str },
}
