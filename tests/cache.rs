//! Artifact cache behaviour: reuse, staleness propagation and version tagging.
mod utils;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nodedoc::doc_utils::{CommonMarkConverter, MarkdownConverter};
use nodedoc::{Freshness, NodedocError};
use utils::{Fixture, set_mtime};

/// Converter that counts how often it runs.
#[derive(Debug, Default)]
struct CountingConverter {
	calls: AtomicUsize,
}

impl MarkdownConverter for CountingConverter {
	fn markdown_to_html(&self, path: &Path) -> nodedoc::Result<String> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		CommonMarkConverter.markdown_to_html(path)
	}
}

#[test]
fn second_render_reuses_both_layers() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let converter = Arc::new(CountingConverter::default());
	let nd = fixture.nodedoc().with_converter(converter.clone());
	let doc = nd.document("fs")?;

	let first = nd.refresh(&doc)?;
	assert_eq!((first.html, first.text), (Freshness::Regenerated, Freshness::Regenerated));
	let first_bytes = fs::read(&first.path)?;

	let second = nd.refresh(&doc)?;
	assert_eq!((second.html, second.text), (Freshness::Fresh, Freshness::Fresh));
	assert!(!second.did_work());
	assert_eq!(second.path, first.path);
	assert_eq!(fs::read(&second.path)?, first_bytes);
	assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
	Ok(())
}

#[test]
fn touching_source_invalidates_both_layers() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let nd = fixture.nodedoc();
	let doc = nd.document("fs")?;
	let paths = nd.cache()?.paths(&doc);
	nd.refresh(&doc)?;

	set_mtime(&paths.html, 100);
	set_mtime(&paths.text, 100);
	set_mtime(&doc.source_path, 50);

	let outcome = nd.refresh(&doc)?;
	assert_eq!(outcome.html, Freshness::Regenerated);
	assert_eq!(outcome.text, Freshness::Regenerated);
	Ok(())
}

#[test]
fn touching_html_invalidates_only_text() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let converter = Arc::new(CountingConverter::default());
	let nd = fixture.nodedoc().with_converter(converter.clone());
	let doc = nd.document("fs")?;
	let paths = nd.cache()?.paths(&doc);
	nd.refresh(&doc)?;

	set_mtime(&doc.source_path, 200);
	set_mtime(&paths.text, 100);
	set_mtime(&paths.html, 50);

	let outcome = nd.refresh(&doc)?;
	assert_eq!(outcome.html, Freshness::Fresh);
	assert_eq!(outcome.text, Freshness::Regenerated);
	assert_eq!(converter.calls.load(Ordering::SeqCst), 1);
	Ok(())
}

#[test]
fn edited_source_shows_up_in_the_artifact() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let nd = fixture.nodedoc();
	let doc = nd.document("http")?;
	let paths = nd.cache()?.paths(&doc);
	nd.ensure_rendered(&doc)?;

	set_mtime(&paths.html, 100);
	set_mtime(&paths.text, 100);
	fs::write(&doc.source_path, "# HTTP\n\n## http.get(options, [callback])\n")?;

	let path = nd.ensure_rendered(&doc)?;
	let artifact = fs::read_to_string(path)?;
	assert!(artifact.contains("## http.get(options, [callback])"));
	assert!(!artifact.contains("http.request"));
	Ok(())
}

#[test]
fn missing_html_layer_is_rebuilt() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let nd = fixture.nodedoc();
	let doc = nd.document("fs")?;
	let first = nd.refresh(&doc)?;
	fs::remove_file(nd.cache()?.paths(&doc).html)?;

	let outcome = nd.refresh(&doc)?;
	assert_eq!(outcome.html, Freshness::Regenerated);
	assert_eq!(outcome.text, Freshness::Regenerated);
	assert_eq!(outcome.path, first.path);
	Ok(())
}

#[test]
fn render_versions_do_not_clobber_each_other() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let old = fixture.nodedoc().with_render_version("1.0.0");
	let new = fixture.nodedoc().with_render_version("1.1.0");

	let old_path = old.ensure_rendered(&old.document("fs")?)?;
	let new_path = new.ensure_rendered(&new.document("fs")?)?;

	assert_ne!(old_path, new_path);
	assert!(old_path.ends_with("v0.10/fs-1.0.0.nodedoc"));
	assert!(new_path.ends_with("v0.10/fs-1.1.0.nodedoc"));
	assert!(old_path.exists() && new_path.exists());
	assert!(fixture.cache_dir().join("v0.10").join("fs.html").exists());
	Ok(())
}

#[test]
fn removed_source_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let nd = fixture.nodedoc();
	let doc = nd.document("fs")?;
	fs::remove_file(&doc.source_path)?;

	assert!(matches!(nd.ensure_rendered(&doc), Err(NodedocError::NotFound(_))));
	assert!(matches!(nd.document("fs"), Err(NodedocError::NotFound(_))));
	Ok(())
}

#[test]
fn artifact_is_styled_terminal_text() -> Result<(), Box<dyn std::error::Error>> {
	let fixture = Fixture::new();
	let nd = fixture.nodedoc();
	let artifact = fs::read_to_string(nd.ensure_rendered(&nd.document("fs")?)?)?;

	assert!(artifact.starts_with("\x1b[1m\x1b[31m# File System\x1b[39m\x1b[22m"));
	assert!(artifact.contains("    \x1b[90mStability: 3 - Stable\x1b[39m"));
	assert!(artifact.contains("\n\n\x1b[1m\x1b[31m## fs.chown(path, uid, gid, [callback])\x1b[39m\x1b[22m"));
	assert!(artifact.contains("the \x1b[36m*\x1b[39m\x1b[36mentire\x1b[39m\x1b[36m*\x1b[39m contents"));
	assert!(!artifact.contains('<'));
	assert!(artifact.lines().all(|line| !line.contains("&amp;")));
	Ok(())
}
