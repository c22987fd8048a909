//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use nodedoc::Nodedoc;
use tempfile::TempDir;

pub const FS_MARKDOWN: &str = "\
# File System

    Stability: 3 - Stable

File I/O is provided by simple wrappers around standard POSIX functions.

## fs.chown(path, uid, gid, [callback])

Asynchronous chown(2). No arguments other than a possible exception are given
to the completion callback.

## fs.chownSync(path, uid, gid)

Synchronous chown(2).

## fs.readFile(filename, [options], callback)

Asynchronously reads the *entire* contents of a file.

## fs.readdir(path, [callback])

## fs.readlink(path, [callback])

## Class: fs.Stats

#### stats.isFile()
";

pub const STREAM_MARKDOWN: &str = "\
# Stream

## Class: stream.Readable

### readable.read([size])

Pull some data out of the internal buffer & return it.
";

pub const EVENTS_MARKDOWN: &str = "\
# Events

<!-- type=module -->

Many objects in Node emit events.

## Class: events.EventEmitter

<!-- type=class -->

To access the EventEmitter class, require the events module.

When an EventEmitter instance experiences an error, the typical action is to
emit an error event.

### emitter.on(event, listener)

Adds a listener to the end of the listeners array.
";

pub const HTTP_MARKDOWN: &str = "\
# HTTP

## http.request(options, [callback])

* `options` can be an object or a string.
* `callback` is optional.
";

/// A documentation root with two versions plus a cache directory.
pub struct Fixture {
	pub temp: TempDir,
}

impl Fixture {
	pub fn new() -> Self {
		let temp = TempDir::new().expect("temp dir");
		let v10 = temp.path().join("doc").join("v0.10");
		let v8 = temp.path().join("doc").join("v0.8");
		fs::create_dir_all(&v10).unwrap();
		fs::create_dir_all(&v8).unwrap();
		fs::write(v10.join("fs.markdown"), FS_MARKDOWN).unwrap();
		fs::write(v10.join("stream.markdown"), STREAM_MARKDOWN).unwrap();
		fs::write(v10.join("http.markdown"), HTTP_MARKDOWN).unwrap();
		fs::write(v10.join("events.markdown"), EVENTS_MARKDOWN).unwrap();
		fs::write(v8.join("fs.markdown"), "# File System\n\n## fs.open(path)\n").unwrap();
		Self { temp }
	}

	pub fn doc_root(&self) -> PathBuf {
		self.temp.path().join("doc")
	}

	pub fn cache_dir(&self) -> PathBuf {
		self.temp.path().join("cache")
	}

	pub fn source(&self, version: &str, section: &str) -> PathBuf {
		self.doc_root().join(version).join(format!("{section}.markdown"))
	}

	pub fn nodedoc(&self) -> Nodedoc {
		Nodedoc::new()
			.with_doc_root(self.doc_root())
			.with_cache_dir(self.cache_dir())
			.with_doc_version("v0.10")
			.with_render_version("test")
	}
}

/// Set the modification time of `path` relative to now.
pub fn set_mtime(path: &Path, seconds_ago: u64) {
	let when = SystemTime::now() - Duration::from_secs(seconds_ago);
	File::options()
		.write(true)
		.open(path)
		.and_then(|file| file.set_modified(when))
		.expect("set mtime");
}
