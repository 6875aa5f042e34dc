//! Embedded item-data locator.
//!
//! Item pages have shipped their data in two shapes over time: a single
//! server-rendered component tag holding the full document, and later a
//! streamed payload split across many push calls. Both are scanned in page
//! order and the first fragment that yields an item record wins. Fragments
//! that fail to decode are skipped.

mod formats;
mod search;

use serde_json::Value;

use formats::{component_fragments, find_item_in_push, parse_component, push_fragments};

/// Recovers the raw item record from page markup.
///
/// For component-tag pages the decoded document is returned as-is (its item
/// lives under a top-level `item` key). For streamed pages the object found
/// under the first `item` key is returned.
///
/// Returns `None` when no fragment produced a record.
#[must_use]
pub fn locate_item_record(html: &str) -> Option<Value> {
    let fragments = component_fragments(html);
    tracing::debug!(count = fragments.len(), "scanning ItemDetails component fragments");
    if let Some(record) = fragments.into_iter().find_map(parse_component) {
        return Some(record);
    }

    let pushes = push_fragments(html);
    tracing::debug!(count = pushes.len(), "scanning streamed payload fragments");
    pushes.into_iter().find_map(find_item_in_push)
}

#[cfg(test)]
#[path = "../locator_test.rs"]
mod tests;
