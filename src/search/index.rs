//! Index expression construction
//!
//! Elasticsearch accepts a comma separated list of index names in the URL,
//! where a leading `-` excludes an index.

use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_\-]*$").expect("valid index name regex"));

/// Whether a short index name can be interpolated into an index expression.
///
/// Rejects separators, wildcards, whitespace and a leading `-`.
pub fn is_valid_index_name(name: &str) -> bool {
    INDEX_NAME.is_match(name)
}

/// Build the index expression for a search.
///
/// Included names replace `<prefix>.default_search` and are lower-cased;
/// exclusions are appended as `-<prefix>.<name>` whether or not includes were given.
pub fn index_expression<I, E>(prefix: &str, indexes: I, exclude_indexes: E) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    E: IntoIterator,
    E::Item: AsRef<str>,
{
    let mut parts: Vec<String> = indexes
        .into_iter()
        .map(|name| format!("{}.{}", prefix, name.as_ref().to_lowercase()))
        .collect();
    if parts.is_empty() {
        parts.push(format!("{}.default_search", prefix));
    }
    parts.extend(
        exclude_indexes
            .into_iter()
            .map(|name| format!("-{}.{}", prefix, name.as_ref())),
    );
    parts.join(",")
}
