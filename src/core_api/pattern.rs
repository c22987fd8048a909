//! Pattern utilities for search query handling.
//!
//! Pure predicates over isolated header text: escape stripping, argument-list
//! stripping and the whole-word test that decides whether a hit is exact.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid escape regex"));
static ARGUMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^()]*\)").expect("valid argument regex"));

/// Remove terminal styling escape sequences.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
	ANSI_ESCAPE.replace_all(text, "")
}

/// Remove parenthesized argument lists, innermost first.
///
/// Converts `"fs.chown(path, uid, gid, [callback])"` to `"fs.chown"`.
pub fn strip_arguments(header: &str) -> String {
	let mut stripped = header.to_string();
	while ARGUMENTS.is_match(&stripped) {
		stripped = ARGUMENTS.replace_all(&stripped, "").into_owned();
	}
	stripped.trim().to_string()
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether `term` appears as a whole word in `header` once argument lists are removed.
pub fn is_exact_match(header: &str, term: &str) -> bool {
	let term = term.trim();
	if term.is_empty() {
		return false;
	}
	let Ok(word) = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))) else {
		return false;
	};
	word.is_match(&strip_arguments(header))
}
