use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::PathBuf;

use semver::Version;

use crate::core_api::error::{NodedocError, Result};

/// File extensions recognised as section sources, in lookup preference order.
pub const SOURCE_EXTENSIONS: [&str; 2] = ["markdown", "md"];

/// Environment variable overriding the documentation root.
pub const DOC_ROOT_ENV: &str = "NODEDOC_DOC_ROOT";

/// One named section of documentation at a given version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	/// Section name, i.e. the basename of the source file.
	pub name: String,
	/// Markdown source for the section.
	pub source_path: PathBuf,
	/// Documentation release the section belongs to.
	pub doc_version: String,
	/// Version of the pipeline that renders the section.
	pub render_version: String,
}

/// A documentation root holding one subdirectory per documentation version.
#[derive(Debug, Clone)]
pub struct DocTree {
	root: PathBuf,
}

impl DocTree {
	/// Open a documentation tree rooted at `root`. Nothing is read until queried.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Documentation versions present in the tree, oldest first.
	pub fn versions(&self) -> Result<Vec<String>> {
		let entries = fs::read_dir(&self.root).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				NodedocError::NotFound(format!("no documentation root at '{}'", self.root.display()))
			} else {
				NodedocError::io(format!("listing {}", self.root.display()), e)
			}
		})?;

		let mut versions = Vec::new();
		for entry in entries {
			let entry = entry.map_err(|e| NodedocError::io(format!("listing {}", self.root.display()), e))?;
			if entry.path().is_dir()
				&& let Some(name) = entry.file_name().to_str()
			{
				versions.push(name.to_string());
			}
		}
		versions.sort_by(|a, b| compare_versions(a, b));
		Ok(versions)
	}

	/// The newest documentation version in the tree.
	pub fn latest_version(&self) -> Result<String> {
		self.versions()?.pop().ok_or_else(|| {
			NodedocError::NotFound(format!("no documentation versions under '{}'", self.root.display()))
		})
	}

	/// Sorted section names available for `version`.
	pub fn sections(&self, version: &str) -> Result<Vec<String>> {
		let dir = self.version_dir(version)?;
		let entries = fs::read_dir(&dir).map_err(|e| NodedocError::io(format!("listing {}", dir.display()), e))?;

		let mut sections = BTreeSet::new();
		for entry in entries {
			let path = entry.map_err(|e| NodedocError::io(format!("listing {}", dir.display()), e))?.path();
			let is_source = path
				.extension()
				.and_then(|ext| ext.to_str())
				.is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
			if is_source
				&& path.is_file()
				&& let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
			{
				sections.insert(stem.to_string());
			}
		}
		Ok(sections.into_iter().collect())
	}

	/// Whether `name` is a section of `version`.
	pub fn has_section(&self, version: &str, name: &str) -> bool {
		self.source_path(version, name).is_ok()
	}

	/// Path of the source file for section `name`.
	pub fn source_path(&self, version: &str, name: &str) -> Result<PathBuf> {
		let dir = self.version_dir(version)?;
		if name.is_empty() || name.contains(['/', '\\']) {
			return Err(no_such_section(name));
		}
		SOURCE_EXTENSIONS
			.iter()
			.map(|ext| dir.join(format!("{name}.{ext}")))
			.find(|path| path.is_file())
			.ok_or_else(|| no_such_section(name))
	}

	/// Resolve section `name` of `version` into a [`Document`].
	pub fn document(&self, version: &str, name: &str, render_version: &str) -> Result<Document> {
		Ok(Document {
			name: name.to_string(),
			source_path: self.source_path(version, name)?,
			doc_version: version.to_string(),
			render_version: render_version.to_string(),
		})
	}

	fn version_dir(&self, version: &str) -> Result<PathBuf> {
		let dir = self.root.join(version);
		if version.is_empty() || !dir.is_dir() {
			return Err(NodedocError::NotFound(format!("no such documentation version: '{version}'")));
		}
		Ok(dir)
	}
}

fn no_such_section(name: &str) -> NodedocError {
	NodedocError::NotFound(format!("no such section: '{name}'"))
}

/// Parse a directory name like `v0.10` or `0.8.14` as a semantic version.
pub fn parse_version(name: &str) -> Option<Version> {
	let trimmed = name.strip_prefix('v').unwrap_or(name);
	let mut parts: Vec<&str> = trimmed.split('.').collect();
	if parts.is_empty() || parts.len() > 3 || parts.iter().any(|part| part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit())) {
		return Version::parse(trimmed).ok();
	}
	parts.resize(3, "0");
	Version::parse(&parts.join(".")).ok()
}

/// Order version names: non-semver names first (lexically), then by semver.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
	match (parse_version(a), parse_version(b)) {
		(Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
		(Some(_), None) => Ordering::Greater,
		(None, Some(_)) => Ordering::Less,
		(None, None) => a.cmp(b),
	}
}

/// Default documentation root: `$NODEDOC_DOC_ROOT`, else the platform data directory.
pub fn default_doc_root() -> Result<PathBuf> {
	if let Ok(dir) = env::var(DOC_ROOT_ENV) {
		return Ok(PathBuf::from(dir));
	}
	let data = dirs::data_dir()
		.ok_or_else(|| NodedocError::Config("Could not determine data directory".to_string()))?;
	Ok(data.join("nodedoc").join("doc"))
}
