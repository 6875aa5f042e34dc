//! Generation 2: streamed framework payload.
//!
//! Newer pages rebuild their data from many `self.__next_f.push([1,"..."])`
//! calls. Each pushed string holds one or more rows shaped like
//! `1f:["$","div",null,{...}]`; the row body after the `id:` token is JSON.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::locator::search::find_item;

static SCRIPT_BODY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>(.*?)</script>").expect("valid script regex")
});
static PUSH_CALL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"self\.__next_f\.push\(\s*").expect("valid push regex"));
static ROW_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9A-Za-z]{1,16}:").expect("valid row prefix regex"));

/// Substring a push must contain to be worth decoding: listing photos carry it.
const PHOTO_URL_MARKER: &str = "full_size_url";

/// Arguments of every push call that mentions a photo URL, in page order.
///
/// A script may hold several calls. Each argument ends where its JSON value
/// ends, so a `)` inside a pushed string never cuts it short. Script bodies
/// are scanned one at a time so a truncated push never swallows the next.
pub(in crate::locator) fn push_fragments(html: &str) -> Vec<&str> {
    SCRIPT_BODY_RE
        .captures_iter(html)
        .filter_map(|cap| cap.get(1))
        .flat_map(|body| {
            let body = body.as_str();
            PUSH_CALL_RE
                .find_iter(body)
                .filter_map(move |call| push_argument(&body[call.end()..]))
        })
        .filter(|arg| arg.contains(PHOTO_URL_MARKER))
        .collect()
}

/// The leading JSON value of `rest`, as a slice.
fn push_argument(rest: &str) -> Option<&str> {
    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<IgnoredAny>();
    match stream.next()? {
        Ok(_) => Some(&rest[..stream.byte_offset()]),
        Err(e) => {
            tracing::debug!(error = %e, "skipping push call with malformed argument");
            None
        }
    }
}

/// Decodes one push argument and returns the first item record found in its
/// rows. Undecodable arguments and rows are skipped.
pub(in crate::locator) fn find_item_in_push(arg: &str) -> Option<Value> {
    let entries: Vec<Value> = match serde_json::from_str(arg) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(error = %e, "skipping push fragment with malformed JSON");
            return None;
        }
    };

    entries
        .iter()
        .filter_map(Value::as_str)
        .flat_map(str::lines)
        .filter_map(row_body)
        .find_map(|body| {
            let value = first_json_value(body)?;
            find_item(&value).cloned()
        })
}

/// Strips the `id:` row token and any type tag letters before the opening
/// bracket. Rows without a token are not JSON rows.
fn row_body(row: &str) -> Option<&str> {
    let prefix = ROW_PREFIX_RE.find(row)?;
    let rest = row[prefix.end()..].trim_start_matches(|c: char| c.is_ascii_alphabetic());
    (rest.starts_with('[') || rest.starts_with('{')).then_some(rest)
}

/// Decodes the leading JSON value of `body`, ignoring anything after it.
fn first_json_value(body: &str) -> Option<Value> {
    let mut stream = serde_json::Deserializer::from_str(body).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            tracing::debug!(error = %e, "skipping undecodable payload row");
            None
        }
        None => None,
    }
}
