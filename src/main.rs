//! CLI entrypoint.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, ValueEnum};
use nodedoc::core_api::error::{NodedocError, Result};
use nodedoc::pager::{Pager, print_artifact};
use nodedoc::{Hit, Lookup, Nodedoc, Query};
use owo_colors::OwoColorize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
/// Output formats for listings.
enum OutputFormat {
	/// Plain text columns.
	Text,
	/// JSON, for scripting.
	Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Parsed command-line options for the nodedoc CLI.
struct Cli {
	/// Section to open, or a term to look up in the API headers of every section
	#[arg(value_name = "SECTION_OR_TERM")]
	target: Option<String>,

	/// Term to look up in the API headers of SECTION
	#[arg(value_name = "TERM")]
	term: Option<String>,

	/// List all sections of the documentation version
	#[arg(short = 'l', long, default_value_t = false)]
	list: bool,

	/// List the documentation versions available
	#[arg(long, default_value_t = false)]
	list_versions: bool,

	/// Always list search hits instead of opening the best one
	#[arg(short = 'a', long, default_value_t = false)]
	all: bool,

	/// Documentation version to read (defaults to the newest)
	#[arg(long, value_name = "VERSION")]
	doc_version: Option<String>,

	/// Documentation root containing one directory per version
	#[arg(long, value_name = "DIR")]
	doc_root: Option<PathBuf>,

	/// Directory for rendered artifacts
	#[arg(long, value_name = "DIR")]
	cache_dir: Option<PathBuf>,

	/// Print to stdout instead of starting a pager
	#[arg(long, default_value_t = false)]
	no_pager: bool,

	/// Disable ANSI colors in listings
	#[arg(long, default_value_t = false)]
	no_color: bool,

	/// Select the listing format
	#[arg(short = 'f', long, value_enum, default_value = "text")]
	format: OutputFormat,

	/// More verbose output
	#[arg(short = 'v', long, default_value_t = false, conflicts_with = "quiet")]
	verbose: bool,

	/// Quieter output (just warnings and errors)
	#[arg(short = 'q', long, default_value_t = false)]
	quiet: bool,
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the flags.
fn init_logging(cli: &Cli) {
	let level = if cli.verbose {
		"debug"
	} else if cli.quiet {
		"warn"
	} else {
		"info"
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("nodedoc={level}")));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_ansi(io::stderr().is_terminal())
		.with_target(false)
		.without_time()
		.init();
}

/// Build a Nodedoc instance configured from the CLI flags.
fn build_nodedoc(cli: &Cli) -> Nodedoc {
	let mut nd = Nodedoc::new();
	if let Some(root) = &cli.doc_root {
		nd = nd.with_doc_root(root.clone());
	}
	if let Some(version) = &cli.doc_version {
		nd = nd.with_doc_version(version.clone());
	}
	if let Some(dir) = &cli.cache_dir {
		nd = nd.with_cache_dir(dir.clone());
	}
	nd
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	io::stdout().is_terminal()
}

/// Write `text` to stdout; a closed stdout is a broken consumer, not a failure.
fn emit(text: &str) -> Result<()> {
	let mut out = io::stdout().lock();
	out.write_all(text.as_bytes())
		.and_then(|_| out.flush())
		.map_err(|e| NodedocError::io("writing to stdout", e))
}

/// Print one name per line, or a JSON array.
fn run_names(cli: &Cli, names: &[String]) -> Result<i32> {
	let rendered = match cli.format {
		OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(names)?),
		OutputFormat::Text => names.iter().map(|name| format!("{name}\n")).collect(),
	};
	emit(&rendered)?;
	Ok(0)
}

/// Format ambiguous hits as a table, highlighting exact matches.
fn format_candidates(hits: &[Hit], color: bool) -> String {
	let section_width = hits.iter().map(|hit| hit.section.len()).max().unwrap_or(0).max("SECTION".len());
	let line_width = hits
		.iter()
		.map(|hit| hit.line.to_string().len())
		.max()
		.unwrap_or(0)
		.max("LINE".len());

	let mut buffer = format!("{:<section_width$}  {:>line_width$}  HEADER\n", "SECTION", "LINE");
	for hit in hits {
		let row = format!("{:<section_width$}  {:>line_width$}  {}", hit.section, hit.line, hit.header);
		if hit.is_exact && color {
			buffer.push_str(&row.bright_green().bold().to_string());
		} else {
			buffer.push_str(&row);
		}
		buffer.push('\n');
	}
	buffer
}

/// Show an artifact through the pager, or print it when paging is off.
fn run_page(cli: &Cli, path: &std::path::Path, line: Option<usize>) -> Result<i32> {
	if cli.no_pager || !io::stdout().is_terminal() {
		print_artifact(path, &mut io::stdout().lock())?;
		return Ok(0);
	}
	let status = Pager::from_env().show(path, line)?;
	Ok(status.code().unwrap_or(1))
}

fn run(cli: &Cli) -> Result<i32> {
	let nd = build_nodedoc(cli);

	if cli.list_versions {
		return run_names(cli, &nd.versions()?);
	}
	if cli.list {
		return run_names(cli, &nd.sections()?);
	}

	let query = match (&cli.target, &cli.term) {
		(Some(section), Some(term)) => Query::SectionTerm {
			section: section.clone(),
			term: term.clone(),
		},
		(Some(arg), None) => nd.classify(arg)?,
		(None, _) => {
			Cli::command()
				.print_help()
				.map_err(|e| NodedocError::io("printing help", e))?;
			return Ok(0);
		}
	};
	debug!(?query, "resolved request");

	match nd.lookup(&query, cli.all)? {
		Lookup::Page { path, line } => run_page(cli, &path, line),
		Lookup::Candidates(hits) => {
			let rendered = match cli.format {
				OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&hits)?),
				OutputFormat::Text => format_candidates(&hits, should_color_output(cli)),
			};
			emit(&rendered)?;
			Ok(0)
		}
	}
}

fn main() {
	let cli = Cli::parse();
	init_logging(&cli);

	let code = match run(&cli) {
		Ok(code) => code,
		Err(e) if e.is_broken_consumer() => 1,
		Err(e) => {
			error!("{e}");
			1
		}
	};
	process::exit(code);
}
