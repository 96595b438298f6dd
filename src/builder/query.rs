//! Query-string merging.

use std::collections::BTreeMap;
use url::Url;

/// Merges `params` into the query string of `url`.
///
/// Existing pairs whose key appears in `params` are dropped and the new value
/// is appended; every other existing pair keeps its position. New pairs are
/// appended in key order so the resulting URL is deterministic. An empty
/// `params` leaves the URL untouched.
pub fn merge_query(url: &mut Url, params: &BTreeMap<String, String>) {
    if params.is_empty() {
        return;
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !params.contains_key(&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

    url.query_pairs_mut().clear().extend_pairs(pairs);
}
