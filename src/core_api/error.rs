use std::fmt;
use std::io;
use std::panic::Location;

use serde_json::Error as SerdeError;
use thiserror::Error;

/// Aggregate errors produced by the nodedoc library.
#[derive(Debug, Error)]
pub enum NodedocError {
	/// A section, version or search term could not be found.
	#[error("{0}")]
	NotFound(String),
	/// The consumer of our output (usually the pager) went away early.
	#[error("broken pipe")]
	BrokenConsumer,
	/// Filesystem failure while reading sources or populating the cache.
	#[error("{context}: {source} ({location})")]
	Io {
		/// What we were doing when the failure happened.
		context: String,
		/// Where in nodedoc the failure was raised.
		location: CallSite,
		/// Underlying IO error.
		#[source]
		source: io::Error,
	},
	/// Configuration could not be resolved (e.g. no platform cache directory).
	#[error("{0}")]
	Config(String),
	/// Failed to encode JSON output.
	#[error(transparent)]
	Serialization(#[from] SerdeError),
}

impl NodedocError {
	/// Wrap an IO error, recording the caller's source location.
	///
	/// A `BrokenPipe` error is folded into [`NodedocError::BrokenConsumer`].
	#[track_caller]
	pub fn io(context: impl Into<String>, source: io::Error) -> Self {
		if source.kind() == io::ErrorKind::BrokenPipe {
			return Self::BrokenConsumer;
		}
		Self::Io {
			context: context.into(),
			location: CallSite(Location::caller()),
			source,
		}
	}

	/// Whether this error only signals that the reader hung up.
	pub fn is_broken_consumer(&self) -> bool {
		matches!(self, Self::BrokenConsumer)
	}
}

impl From<io::Error> for NodedocError {
	#[track_caller]
	fn from(err: io::Error) -> Self {
		Self::io("io error", err)
	}
}

/// Source location an error was raised from.
#[derive(Debug, Clone, Copy)]
pub struct CallSite(&'static Location<'static>);

impl fmt::Display for CallSite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.0.file(), self.0.line())
	}
}

/// Result type returned by the nodedoc library.
pub type Result<T> = std::result::Result<T, NodedocError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn io_errors_carry_context_and_location() {
		let err = NodedocError::io(
			"reading /tmp/fs.markdown",
			io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
		);
		let message = err.to_string();
		assert!(message.starts_with("reading /tmp/fs.markdown: denied ("));
		assert!(message.contains("error.rs:"));
	}

	#[test]
	fn broken_pipe_becomes_broken_consumer() {
		let err: NodedocError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe").into();
		assert!(err.is_broken_consumer());
	}
}
