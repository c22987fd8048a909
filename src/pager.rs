//! Hands finished artifacts to a display program.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command as ProcessCommand, ExitStatus, Stdio};

use tracing::debug;

use crate::core_api::error::{NodedocError, Result};

/// Pager used when `$PAGER` is unset; `-R` keeps the ANSI styling.
pub const DEFAULT_PAGER: &str = "less -R";

/// An external pager command line, run through `sh -c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
	command: String,
}

impl Pager {
	/// Use an explicit command line.
	pub fn new(command: impl Into<String>) -> Self {
		Self { command: command.into() }
	}

	/// `$PAGER`, falling back to [`DEFAULT_PAGER`].
	pub fn from_env() -> Self {
		match env::var("PAGER") {
			Ok(pager) if !pager.trim().is_empty() => Self::new(pager),
			_ => Self::new(DEFAULT_PAGER),
		}
	}

	/// Shell command line used for an optional start line.
	pub fn command_line(&self, line: Option<usize>) -> String {
		match line {
			Some(line) => format!("{} +{line}", self.command),
			None => self.command.clone(),
		}
	}

	/// Stream the artifact at `path` into the pager and wait for it to exit.
	///
	/// The pager quitting before reading everything is reported as
	/// [`NodedocError::BrokenConsumer`].
	pub fn show(&self, path: &Path, line: Option<usize>) -> Result<ExitStatus> {
		let mut artifact = File::open(path).map_err(|e| NodedocError::io(format!("opening {}", path.display()), e))?;
		let command_line = self.command_line(line);
		debug!(command = %command_line, path = %path.display(), "starting pager");

		let mut child = ProcessCommand::new("sh")
			.arg("-c")
			.arg(&command_line)
			.stdin(Stdio::piped())
			.spawn()
			.map_err(|e| NodedocError::io(format!("running pager '{command_line}'"), e))?;

		let streamed = match child.stdin.take() {
			Some(mut stdin) => io::copy(&mut artifact, &mut stdin).and_then(|_| stdin.flush()),
			None => Ok(()),
		};
		let status = child
			.wait()
			.map_err(|e| NodedocError::io(format!("waiting for pager '{command_line}'"), e))?;
		streamed.map_err(|e| NodedocError::io(format!("streaming {} to pager", path.display()), e))?;
		Ok(status)
	}
}

/// Copy the artifact at `path` to `out`, used when paging is disabled.
pub fn print_artifact(path: &Path, out: &mut impl Write) -> Result<()> {
	let mut artifact = File::open(path).map_err(|e| NodedocError::io(format!("opening {}", path.display()), e))?;
	io::copy(&mut artifact, out)
		.and_then(|_| out.flush())
		.map_err(|e| NodedocError::io("writing to stdout", e))?;
	Ok(())
}
