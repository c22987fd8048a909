//! Two-layer artifact cache for rendered sections.
//!
//! Each section is cached as intermediate HTML and as final terminal text.
//! A layer is rebuilt when it is missing or older than its upstream input,
//! so touching a source invalidates both layers while touching the HTML
//! only invalidates the terminal text.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use std::{env, fs};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::convert::MarkdownConverter;
use super::source::Document;
use crate::core_api::error::{NodedocError, Result};
use crate::render;

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "NODEDOC_CACHE_DIR";

/// File extension of final terminal-text artifacts.
pub const ARTIFACT_EXTENSION: &str = "nodedoc";

/// Configuration for the artifact cache location.
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
	/// Directory where artifacts are stored.
	/// If None, uses the default cache directory.
	pub cache_dir: Option<PathBuf>,
}

impl CacheConfig {
	/// Create a configuration that uses the default cache directory.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a custom cache directory.
	pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
		self.cache_dir = Some(dir);
		self
	}

	/// Get the cache directory, using the default if not specified.
	pub fn get_cache_dir(&self) -> Result<PathBuf> {
		if let Some(ref dir) = self.cache_dir {
			return Ok(dir.clone());
		}

		if let Ok(dir) = env::var(CACHE_DIR_ENV) {
			return Ok(PathBuf::from(dir));
		}

		let cache_base = dirs::cache_dir()
			.ok_or_else(|| NodedocError::Config("Could not determine cache directory".to_string()))?;

		Ok(cache_base.join("nodedoc"))
	}
}

/// Whether a cache layer was reused or rebuilt by a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
	/// The existing artifact was up to date.
	Fresh,
	/// The artifact was (re)written during this call.
	Regenerated,
}

/// Cache file locations for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
	/// Intermediate HTML artifact.
	pub html: PathBuf,
	/// Final terminal-text artifact, tagged with the render version.
	pub text: PathBuf,
}

/// Result of bringing a document's artifacts up to date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOutcome {
	/// Path of the terminal-text artifact.
	pub path: PathBuf,
	/// What happened to the HTML layer.
	pub html: Freshness,
	/// What happened to the terminal-text layer.
	pub text: Freshness,
}

impl CacheOutcome {
	/// Whether any layer had to be rebuilt.
	pub fn did_work(&self) -> bool {
		self.html == Freshness::Regenerated || self.text == Freshness::Regenerated
	}
}

/// Disk cache of rendered documents rooted at one directory.
#[derive(Debug, Clone)]
pub struct ArtifactCache {
	root: PathBuf,
}

impl ArtifactCache {
	/// Create a cache rooted at `root`. The directory is created lazily.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Expected artifact locations for `doc`.
	pub fn paths(&self, doc: &Document) -> ArtifactPaths {
		let dir = self.root.join(&doc.doc_version);
		ArtifactPaths {
			html: dir.join(format!("{}.html", doc.name)),
			text: dir.join(format!("{}-{}.{ARTIFACT_EXTENSION}", doc.name, doc.render_version)),
		}
	}

	/// Make sure the terminal artifact for `doc` is current and return its path.
	pub fn ensure_rendered(&self, doc: &Document, converter: &dyn MarkdownConverter) -> Result<PathBuf> {
		Ok(self.refresh(doc, converter)?.path)
	}

	/// Bring both cache layers for `doc` up to date, reporting what was rebuilt.
	pub fn refresh(&self, doc: &Document, converter: &dyn MarkdownConverter) -> Result<CacheOutcome> {
		let source_mtime = modified(&doc.source_path)?
			.ok_or_else(|| NodedocError::NotFound(format!("no such section: '{}'", doc.name)))?;
		let paths = self.paths(doc);

		let html = if is_stale(&paths.html, source_mtime)? {
			debug!(section = %doc.name, path = %paths.html.display(), "regenerating html");
			let html = converter.markdown_to_html(&doc.source_path)?;
			write_atomic(&paths.html, &html)?;
			Freshness::Regenerated
		} else {
			Freshness::Fresh
		};

		// A rebuilt HTML layer always forces the text layer, even when coarse
		// filesystem timestamps make the two mtimes compare equal.
		let text_stale = html == Freshness::Regenerated || {
			let html_mtime = modified(&paths.html)?.unwrap_or(SystemTime::UNIX_EPOCH);
			is_stale(&paths.text, html_mtime)?
		};
		let text = if text_stale {
			debug!(section = %doc.name, path = %paths.text.display(), "regenerating terminal text");
			let html = fs::read_to_string(&paths.html)
				.map_err(|e| NodedocError::io(format!("reading {}", paths.html.display()), e))?;
			write_atomic(&paths.text, &render::render(&html))?;
			Freshness::Regenerated
		} else {
			Freshness::Fresh
		};

		trace!(section = %doc.name, path = %paths.text.display(), "artifact ready");
		Ok(CacheOutcome {
			path: paths.text,
			html,
			text,
		})
	}
}

/// Modification time of `path`, or `None` when it does not exist.
fn modified(path: &Path) -> Result<Option<SystemTime>> {
	match fs::metadata(path) {
		Ok(meta) => meta
			.modified()
			.map(Some)
			.map_err(|e| NodedocError::io(format!("reading mtime of {}", path.display()), e)),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
		Err(e) => Err(NodedocError::io(format!("inspecting {}", path.display()), e)),
	}
}

/// An artifact is stale when missing or strictly older than its upstream.
fn is_stale(artifact: &Path, upstream: SystemTime) -> Result<bool> {
	Ok(match modified(artifact)? {
		Some(mtime) => mtime < upstream,
		None => true,
	})
}

/// Write to a temporary sibling, then rename over `path` so readers never see a partial file.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
	let dir = path.parent().unwrap_or_else(|| Path::new("."));
	fs::create_dir_all(dir).map_err(|e| NodedocError::io(format!("creating cache directory {}", dir.display()), e))?;

	let mut temp = NamedTempFile::new_in(dir)
		.map_err(|e| NodedocError::io(format!("creating temporary file in {}", dir.display()), e))?;
	temp.write_all(contents.as_bytes())
		.map_err(|e| NodedocError::io(format!("writing {}", temp.path().display()), e))?;
	temp.persist(path)
		.map_err(|e| NodedocError::io(format!("finalizing cache file {}", path.display()), e.error))?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn doc(name: &str) -> Document {
		Document {
			name: name.to_string(),
			source_path: PathBuf::from(format!("/docs/v0.10/{name}.markdown")),
			doc_version: "v0.10".to_string(),
			render_version: "1.1.0".to_string(),
		}
	}

	#[test]
	fn artifact_paths_are_version_tagged() {
		let cache = ArtifactCache::new("/cache");
		let paths = cache.paths(&doc("fs"));
		assert_eq!(paths.html, PathBuf::from("/cache/v0.10/fs.html"));
		assert_eq!(paths.text, PathBuf::from("/cache/v0.10/fs-1.1.0.nodedoc"));
	}

	#[test]
	fn explicit_cache_dir_wins() {
		let config = CacheConfig::new().with_cache_dir(PathBuf::from("/tmp/nd"));
		assert_eq!(config.get_cache_dir().unwrap(), PathBuf::from("/tmp/nd"));
	}

	#[test]
	fn missing_source_is_not_found() {
		let temp = tempfile::TempDir::new().unwrap();
		let cache = ArtifactCache::new(temp.path());
		let err = cache
			.refresh(&doc("nope"), &crate::doc_utils::CommonMarkConverter)
			.unwrap_err();
		assert!(matches!(err, NodedocError::NotFound(_)));
	}
}
