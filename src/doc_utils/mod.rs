//! Documentation sources, Markdown conversion and the artifact cache.

/// Two-layer, mtime-validated artifact cache.
pub mod cache;
/// Markdown to HTML conversion.
pub mod convert;
/// Documentation tree layout and section lookup.
pub mod source;

pub use self::cache::{ArtifactCache, ArtifactPaths, CacheConfig, CacheOutcome, Freshness};
pub use self::convert::{CommonMarkConverter, MarkdownConverter};
pub use self::source::{DocTree, Document, default_doc_root};
