pub(crate) mod metrics;
pub(crate) mod trace_root;

use once_cell::sync::Lazy;
use regex::Regex;

static TODO_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/todos/[^/]+").expect("Invalid todo id regex"));

/// Collapses concrete ids so metric labels and span names stay bounded.
pub(crate) fn normalize_uri(path: &str) -> String {
    TODO_ID_REGEX.replace_all(path, "/todos/{id}").to_string()
}
