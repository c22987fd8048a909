//! Core library for nodedoc, a perldoc-style reader for node.js API documentation.
//!
//! Markdown sections are converted to HTML, rewritten by an ordered pipeline
//! into ANSI-styled text, cached on disk keyed by documentation and render
//! version, and searched by header to jump straight to an API entry.

/// Core API: configuration context, request handling and search.
pub mod core_api;

/// Documentation sources, Markdown conversion and the artifact cache.
pub mod doc_utils;

/// Pager dispatch for finished artifacts.
pub mod pager;

/// ANSI transform pipeline.
pub mod render;

pub use crate::core_api::{Hit, Lookup, Nodedoc, NodedocError, Query, Resolution, Result};
pub use crate::doc_utils::{CacheOutcome, Document, Freshness, MarkdownConverter};
pub use crate::pager::Pager;
