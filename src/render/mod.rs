//! ANSI transform pipeline: converter-dialect HTML in, pager-ready text out.

/// Ordered rewrite stages and the `render` entrypoint.
pub mod core;
/// Named terminal styles.
pub mod style;
/// Width-aware reflow helpers.
pub mod wrap;

pub use self::core::{STAGES, Stage, render, stage};
pub use self::style::Style;
