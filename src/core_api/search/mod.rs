//! Header search over rendered artifacts.
//!
//! Matching happens in two steps: header lines are isolated first, then the
//! term predicates from [`crate::core_api::pattern`] run on the isolated text.

mod lines;
mod matcher;
mod resolve;
mod types;

pub use lines::LineIndex;
pub use matcher::{HeaderLine, header_hits, header_lines};
pub use resolve::{mark_exact, resolve};
pub use types::{Hit, Resolution};
