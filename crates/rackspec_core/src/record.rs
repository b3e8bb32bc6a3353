use std::sync::LazyLock;

use regex::Regex;

use crate::field::FieldMap;

/// One scraped page: where it came from, when, and what was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRecord {
    pub url: String,
    pub model_name: String,
    pub date_scraped: String,
    pub fields: FieldMap,
}

static MODEL_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/#]+)(?:#|$)").unwrap());

/// Derives a model name from a product URL: the first path segment that runs
/// up to a fragment marker or the end of the string. URLs with no such
/// segment (for example ones ending in a slash) yield `"Unknown"`.
pub fn model_name_from_url(url: &str) -> String {
    MODEL_SEGMENT
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
