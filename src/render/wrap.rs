//! Greedy reflow for paragraph and list text.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// Escape sequences and leftover markup tags; neither occupies a terminal column.
static ZERO_WIDTH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m|<[^>]*>").expect("valid zero-width regex"));

/// Entities still escaped at reflow time; each shows as one column.
static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&(?:lt|gt|amp|quot|#39);").expect("valid entity regex"));

/// Number of terminal columns `text` occupies once styling and tags are ignored.
pub fn visible_width(text: &str) -> usize {
	let visible = ZERO_WIDTH.replace_all(text, "");
	ENTITY.replace_all(&visible, "&").width()
}

/// Split `text` on whitespace, except whitespace inside a `<...>` tag.
fn words(text: &str) -> Vec<&str> {
	let mut words = Vec::new();
	let mut start = None;
	let mut in_tag = false;
	for (idx, ch) in text.char_indices() {
		match ch {
			'<' => in_tag = true,
			'>' => in_tag = false,
			_ => {}
		}
		if ch.is_whitespace() && !in_tag {
			if let Some(begin) = start.take() {
				words.push(&text[begin..idx]);
			}
		} else if start.is_none() {
			start = Some(idx);
		}
	}
	if let Some(begin) = start {
		words.push(&text[begin..]);
	}
	words
}

/// Reflow `text` into lines no wider than `width` visible columns.
///
/// Runs of whitespace collapse to a single space. A word wider than `width`
/// gets a line of its own rather than being split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	let mut current_width = 0;

	for word in words(text) {
		let word_width = visible_width(word);
		if !current.is_empty() && current_width + 1 + word_width > width {
			lines.push(std::mem::take(&mut current));
			current_width = 0;
		}
		if !current.is_empty() {
			current.push(' ');
			current_width += 1;
		}
		current.push_str(word);
		current_width += word_width;
	}
	if !current.is_empty() {
		lines.push(current);
	}
	lines
}

/// Prefix every line of `text` with `indent`, keeping the line endings.
pub fn indent_lines(text: &str, indent: &str) -> String {
	let mut out = String::with_capacity(text.len() + indent.len() * 4);
	for line in text.split_inclusive('\n') {
		out.push_str(indent);
		out.push_str(line);
	}
	out
}
