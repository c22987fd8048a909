use std::path::PathBuf;

/// A single header matched by a search.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hit {
	/// Section whose artifact contains the header.
	pub section: String,
	/// Terminal artifact the offsets refer to.
	pub artifact: PathBuf,
	/// Header text without `#` markers or styling, trimmed.
	pub header: String,
	/// Byte offset where the header line starts.
	pub start: usize,
	/// Byte offset just past the header line.
	pub end: usize,
	/// One-indexed line number of the header within the artifact.
	pub line: usize,
	/// Whether the term is a whole word of the header once arguments are stripped.
	pub is_exact: bool,
}

/// Outcome of applying the disambiguation policy to a set of hits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// One hit was selected and can be opened directly.
	Single(Hit),
	/// No unique choice; every hit is returned with its exactness filled in.
	Candidates(Vec<Hit>),
}
