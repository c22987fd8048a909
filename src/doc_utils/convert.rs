use std::fmt;
use std::fs;
use std::path::Path;

use pulldown_cmark::{Event, Options, Parser, html};

use crate::core_api::error::{NodedocError, Result};

/// Converts a Markdown source file into the HTML dialect the render pipeline expects.
pub trait MarkdownConverter: fmt::Debug + Send + Sync {
	/// Read `path` and return its HTML rendering.
	fn markdown_to_html(&self, path: &Path) -> Result<String>;
}

/// CommonMark converter backed by `pulldown-cmark`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMarkConverter;

impl CommonMarkConverter {
	/// Convert Markdown text that is already in memory.
	///
	/// Top-level blocks are separated by a blank line, so paragraph breaks
	/// survive once the pipeline has removed the tags.
	pub fn convert_str(&self, markdown: &str) -> String {
		let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
		let mut block = Vec::new();
		let mut depth = 0usize;
		for event in Parser::new_ext(markdown, Options::empty()) {
			match event {
				Event::Start(_) => depth += 1,
				Event::End(_) => depth = depth.saturating_sub(1),
				_ => {}
			}
			block.push(event);
			if depth == 0 {
				if !out.is_empty() {
					out.push('\n');
				}
				html::push_html(&mut out, block.drain(..));
			}
		}
		out
	}
}

impl MarkdownConverter for CommonMarkConverter {
	fn markdown_to_html(&self, path: &Path) -> Result<String> {
		let markdown = fs::read_to_string(path)
			.map_err(|e| NodedocError::io(format!("reading {}", path.display()), e))?;
		Ok(self.convert_str(&markdown))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn emits_the_flat_dialect() {
		let html = CommonMarkConverter.convert_str("## fs.rm & friends\n\nRemove *things*.\n\n* one\n* two\n");
		assert_eq!(
			html,
			"<h2>fs.rm &amp; friends</h2>\n\n<p>Remove <em>things</em>.</p>\n\n<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
		);
	}

	#[test]
	fn nested_blocks_are_not_split() {
		let html = CommonMarkConverter.convert_str("* one\n\n  more\n* two\n\n<!-- type=misc -->\n\ntail\n");
		let (list, rest) = html.split_once("</ul>").expect("list is closed");
		assert!(!list.contains("\n\n"));
		assert_eq!(rest, "\n\n<!-- type=misc -->\n\n<p>tail</p>\n");
	}

	#[test]
	fn missing_file_is_an_io_error() {
		let err = CommonMarkConverter
			.markdown_to_html(Path::new("/definitely/not/here.markdown"))
			.unwrap_err();
		assert!(matches!(err, NodedocError::Io { .. }));
	}
}
