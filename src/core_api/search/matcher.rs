use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::lines::LineIndex;
use super::types::Hit;
use crate::core_api::pattern::{contains_ignore_case, strip_ansi};

/// Level-2 and level-3 header lines, allowing styling escapes around them.
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?m)^(?:\x1b\[[0-9;]*m)*#{2,3} ([^\n]*?)(?:\x1b\[[0-9;]*m)*$").expect("valid header regex")
});

/// A header line isolated from a rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
	/// Header text with styling removed and whitespace trimmed.
	pub text: String,
	/// Byte offset of the line start.
	pub start: usize,
	/// Byte offset of the line end.
	pub end: usize,
}

/// Iterate over the level-2/3 headers of a rendered artifact.
pub fn header_lines(artifact: &str) -> impl Iterator<Item = HeaderLine> {
	HEADER_LINE.captures_iter(artifact).filter_map(|caps| {
		let line = caps.get(0)?;
		let title = caps.get(1)?;
		Some(HeaderLine {
			text: strip_ansi(title.as_str()).trim().to_string(),
			start: line.start(),
			end: line.end(),
		})
	})
}

/// Find the headers of one artifact whose text contains `term`, ignoring case.
///
/// Line starts are only indexed once the first header matches.
pub fn header_hits(term: &str, section: &str, artifact_path: &Path, artifact: &str) -> Vec<Hit> {
	let mut index: Option<LineIndex> = None;
	header_lines(artifact)
		.filter(|header| contains_ignore_case(&header.text, term))
		.map(|header| {
			let line = index.get_or_insert_with(|| LineIndex::new(artifact)).line_of(header.start);
			Hit {
				section: section.to_string(),
				artifact: artifact_path.to_path_buf(),
				header: header.text,
				start: header.start,
				end: header.end,
				line,
				is_exact: false,
			}
		})
		.collect()
}
