//! Decoding of loosely shaped CMS media and taxonomy fields.
//!
//! Headless CMS payloads nest the same information in several ways depending on population
//! depth and API version. The shapes are resolved here, once, into plain values.

use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
/// Outcome of decoding a media field.
pub enum MediaUrl {
    /// A usable URL.
    Known(String),
    /// No recognised shape carried a URL.
    Unknown,
}

impl MediaUrl {
    #[must_use]
    /// The URL, when known.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Known(url) => Some(url),
            Self::Unknown => None,
        }
    }
}

const URL_PATHS: &[&[&str]] = &[
    &["url"],
    &["data", "attributes", "url"],
    &["data", "0", "attributes", "url"],
    &["data", "url"],
    &["formats", "thumbnail", "url"],
    &["data", "attributes", "formats", "thumbnail", "url"],
];

/// Decodes a media field into a [`MediaUrl`].
///
/// Accepts a bare string or any of the nested object shapes a CMS produces for an uploaded
/// file. Empty strings count as missing.
#[must_use]
pub fn decode_media_url(value: &Value) -> MediaUrl {
    if let Some(url) = non_empty_str(value) {
        return MediaUrl::Known(url.to_string());
    }
    URL_PATHS
        .iter()
        .find_map(|path| lookup(value, path).and_then(non_empty_str))
        .map_or(MediaUrl::Unknown, |url| MediaUrl::Known(url.to_string()))
}

/// Decodes a tag or category list into names.
///
/// Accepts an array of strings, an array of objects with a `name` (optionally under
/// `attributes`), or either of those wrapped in `{ "data": [...] }`.
#[must_use]
pub fn decode_names(value: &Value) -> Vec<String> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    items
        .iter()
        .filter_map(|item| {
            non_empty_str(item)
                .or_else(|| lookup(item, &["name"]).and_then(non_empty_str))
                .or_else(|| lookup(item, &["attributes", "name"]).and_then(non_empty_str))
        })
        .map(str::to_string)
        .collect()
}

fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| match current {
        Value::Object(map) => map.get(*key),
        Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "tests/media.rs"]
mod tests;
