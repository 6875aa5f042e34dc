//! Generation 1: server-rendered React component props.
//!
//! Older item pages carry the whole item document as the body of a single
//! `<script type="application/json" class="js-react-on-rails-component"
//! data-component-name="ItemDetails">` tag.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script>").expect("valid script regex")
});
static TYPE_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\btype\s*=\s*["']application/json["']"#).expect("valid type regex")
});
static REACT_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*["'][^"']*\bjs-react-on-rails-component\b"#)
        .expect("valid class regex")
});
static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bdata-component-name\s*=\s*["']ItemDetails["']"#)
        .expect("valid component regex")
});

/// Bodies of every `ItemDetails` component tag, in page order.
pub(in crate::locator) fn component_fragments(html: &str) -> Vec<&str> {
    SCRIPT_RE
        .captures_iter(html)
        .filter_map(|cap| {
            let attrs = cap.get(1)?.as_str();
            let is_component = TYPE_JSON_RE.is_match(attrs)
                && REACT_CLASS_RE.is_match(attrs)
                && COMPONENT_RE.is_match(attrs);
            is_component.then(|| cap.get(2).map_or("", |m| m.as_str()).trim())
        })
        .collect()
}

/// Parses a component body. The decoded document is the record itself.
pub(in crate::locator) fn parse_component(body: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(error = %e, "skipping ItemDetails component with malformed JSON");
            None
        }
    }
}
