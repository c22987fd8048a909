/// Start offsets of every line in a text, for offset to line-number lookups.
#[derive(Debug, Clone)]
pub struct LineIndex {
	starts: Vec<usize>,
}

impl LineIndex {
	/// Index the line starts of `text`.
	pub fn new(text: &str) -> Self {
		let mut starts = Vec::with_capacity(text.len() / 40 + 1);
		starts.push(0);
		starts.extend(text.match_indices('\n').map(|(idx, _)| idx + 1));
		Self { starts }
	}

	/// One-indexed line containing byte `offset`.
	///
	/// Counts the line starts at or before `offset` with a binary search.
	pub fn line_of(&self, offset: usize) -> usize {
		self.starts.partition_point(|&start| start <= offset)
	}

	/// Number of line starts, including an empty last line after a trailing newline.
	pub fn len(&self) -> usize {
		self.starts.len()
	}

	/// Never true: every text has at least one line.
	pub fn is_empty(&self) -> bool {
		self.starts.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_map_to_one_indexed_lines() {
		let index = LineIndex::new("ab\ncd\n\nef");
		assert_eq!(index.line_of(0), 1);
		assert_eq!(index.line_of(2), 1);
		assert_eq!(index.line_of(3), 2);
		assert_eq!(index.line_of(6), 3);
		assert_eq!(index.line_of(7), 4);
		assert_eq!(index.len(), 4);
	}

	#[test]
	fn empty_text_has_one_line() {
		let index = LineIndex::new("");
		assert_eq!(index.line_of(0), 1);
		assert!(!index.is_empty());
	}
}
