use serde::{Deserialize, Serialize};

/// Human-readable digest of a listing, written as `item_summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub source: String,
    pub title: String,
    /// Kept verbatim; embedded line breaks stay literal in the rendered text.
    pub description: String,
    pub seller: String,
    pub seller_id: i64,
    pub last_logged_in: String,
}

impl ItemSummary {
    /// Renders the fixed six-line text format, one `key: value` per line.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for ItemSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "source: {}", self.source)?;
        writeln!(f, "title: {}", self.title)?;
        writeln!(f, "description: {}", self.description)?;
        writeln!(f, "seller: {}", self.seller)?;
        writeln!(f, "seller id: {}", self.seller_id)?;
        writeln!(f, "seller last logged in: {}", self.last_logged_in)
    }
}
