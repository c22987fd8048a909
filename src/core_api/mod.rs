//! Core library API for nodedoc.
//!
//! [`Nodedoc`] is the explicit context value every operation runs against: it
//! knows where the documentation lives, which version is active, where the
//! cache goes and how Markdown is converted. Build it once at start-up.

/// Error helpers for the core API.
pub mod error;
/// Pattern utilities for search query handling.
pub mod pattern;
/// Header search, line numbering and disambiguation.
pub mod search;

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

pub use self::error::{NodedocError, Result};
pub use self::search::{Hit, Resolution};
use crate::doc_utils::{ArtifactCache, CacheConfig, CacheOutcome, CommonMarkConverter, DocTree, Document, MarkdownConverter, default_doc_root};

/// Environment variable selecting the documentation version.
pub const DOC_VERSION_ENV: &str = "NODEDOC_VERSION";

/// What a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
	/// Open a whole section.
	Section(String),
	/// Search headers of every section for a term.
	Term(String),
	/// Search headers of one section for a term.
	SectionTerm {
		/// Section to search.
		section: String,
		/// Term to look for.
		term: String,
	},
}

/// What a request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
	/// Show an artifact, optionally starting at a one-indexed line.
	Page {
		/// Terminal artifact to display.
		path: PathBuf,
		/// Line to scroll to on open.
		line: Option<usize>,
	},
	/// Several hits and no unique choice; the caller lists them.
	Candidates(Vec<Hit>),
}

/// Renders node.js documentation sections to terminal text and searches them.
#[derive(Debug, Clone)]
pub struct Nodedoc {
	/// Documentation root; resolved from the environment when unset.
	doc_root: Option<PathBuf>,

	/// Documentation version; the newest one in the tree when unset.
	doc_version: Option<String>,

	/// Tag distinguishing artifacts produced by different pipeline versions.
	render_version: String,

	/// Cache location.
	cache_config: CacheConfig,

	/// Markdown to HTML converter.
	converter: Arc<dyn MarkdownConverter>,
}

impl Default for Nodedoc {
	fn default() -> Self {
		Self::new()
	}
}

impl Nodedoc {
	/// Creates a new Nodedoc instance with default configuration.
	pub fn new() -> Self {
		Self {
			doc_root: None,
			doc_version: None,
			render_version: env!("CARGO_PKG_VERSION").to_string(),
			cache_config: CacheConfig::default(),
			converter: Arc::new(CommonMarkConverter),
		}
	}

	/// Sets the documentation root directory.
	pub fn with_doc_root(mut self, root: PathBuf) -> Self {
		self.doc_root = Some(root);
		self
	}

	/// Selects the documentation version to read.
	pub fn with_doc_version(mut self, version: impl Into<String>) -> Self {
		self.doc_version = Some(version.into());
		self
	}

	/// Overrides the render version used to tag cached artifacts.
	pub fn with_render_version(mut self, version: impl Into<String>) -> Self {
		self.render_version = version.into();
		self
	}

	/// Sets a custom cache directory.
	pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
		self.cache_config = self.cache_config.with_cache_dir(dir);
		self
	}

	/// Replaces the Markdown converter.
	pub fn with_converter(mut self, converter: Arc<dyn MarkdownConverter>) -> Self {
		self.converter = converter;
		self
	}

	/// Returns the render version tag.
	pub fn render_version(&self) -> &str {
		&self.render_version
	}

	/// The documentation tree this instance reads from.
	pub fn doc_tree(&self) -> Result<DocTree> {
		let root = match &self.doc_root {
			Some(root) => root.clone(),
			None => default_doc_root()?,
		};
		Ok(DocTree::new(root))
	}

	/// The artifact cache this instance writes to.
	pub fn cache(&self) -> Result<ArtifactCache> {
		Ok(ArtifactCache::new(self.cache_config.get_cache_dir()?))
	}

	/// The documentation version requests are served from.
	pub fn active_version(&self) -> Result<String> {
		if let Some(version) = &self.doc_version {
			return Ok(version.clone());
		}
		if let Ok(version) = env::var(DOC_VERSION_ENV)
			&& !version.is_empty()
		{
			return Ok(version);
		}
		self.doc_tree()?.latest_version()
	}

	/// Documentation versions available, oldest first.
	pub fn versions(&self) -> Result<Vec<String>> {
		self.doc_tree()?.versions()
	}

	/// Sections of the active documentation version.
	pub fn sections(&self) -> Result<Vec<String>> {
		self.doc_tree()?.sections(&self.active_version()?)
	}

	/// Resolve a section of the active version.
	pub fn document(&self, name: &str) -> Result<Document> {
		self.doc_tree()?.document(&self.active_version()?, name, &self.render_version)
	}

	/// Bring the cached artifacts of `doc` up to date.
	pub fn refresh(&self, doc: &Document) -> Result<CacheOutcome> {
		self.cache()?.refresh(doc, self.converter.as_ref())
	}

	/// Path to an up-to-date terminal artifact for `doc`.
	pub fn ensure_rendered(&self, doc: &Document) -> Result<PathBuf> {
		self.cache()?.ensure_rendered(doc, self.converter.as_ref())
	}

	/// Decide whether a lone argument names a section or is a search term.
	///
	/// A known section name always wins.
	pub fn classify(&self, arg: &str) -> Result<Query> {
		let tree = self.doc_tree()?;
		let version = self.active_version()?;
		if tree.has_section(&version, arg) {
			Ok(Query::Section(arg.to_string()))
		} else {
			Ok(Query::Term(arg.to_string()))
		}
	}

	/// Search the level-2/3 headers of `sections` for `term`, in section order.
	pub fn search(&self, term: &str, sections: &[String]) -> Result<Vec<Hit>> {
		let term = term.trim();
		if term.is_empty() {
			return Err(NodedocError::NotFound("empty search term".to_string()));
		}

		let tree = self.doc_tree()?;
		let version = self.active_version()?;
		let cache = self.cache()?;
		let mut hits = Vec::new();
		for section in sections {
			let doc = tree.document(&version, section, &self.render_version)?;
			let path = cache.ensure_rendered(&doc, self.converter.as_ref())?;
			let artifact =
				fs::read_to_string(&path).map_err(|e| NodedocError::io(format!("reading {}", path.display()), e))?;
			hits.extend(search::header_hits(term, section, &path, &artifact));
		}
		debug!(term, sections = sections.len(), hits = hits.len(), "searched headers");
		Ok(hits)
	}

	/// Run a request through the cache and, for terms, the search engine.
	///
	/// With `list_mode` set, term searches always return their candidates.
	pub fn lookup(&self, query: &Query, list_mode: bool) -> Result<Lookup> {
		let (term, sections) = match query {
			Query::Section(name) => {
				let path = self.ensure_rendered(&self.document(name)?)?;
				return Ok(Lookup::Page { path, line: None });
			}
			Query::Term(term) => (term, self.sections()?),
			Query::SectionTerm { section, term } => {
				// Fail on an unknown section before rendering anything.
				self.document(section)?;
				(term, vec![section.clone()])
			}
		};

		let hits = self.search(term, &sections)?;
		match search::resolve(hits, term.trim(), list_mode)? {
			Resolution::Single(hit) => Ok(Lookup::Page {
				path: hit.artifact,
				line: Some(hit.line),
			}),
			Resolution::Candidates(hits) => Ok(Lookup::Candidates(hits)),
		}
	}
}
