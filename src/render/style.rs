//! Named ANSI styles used by the transform pipeline.
//!
//! Every style is an enter/exit escape pair. Colour styles exit through the
//! default-foreground code so they nest inside bold without resetting it.

/// A terminal text style with a fixed enter/exit escape sequence pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
	/// Header text.
	Red,
	/// Inline and block code.
	Green,
	/// Emphasis and strong emphasis.
	Cyan,
	/// Stability annotations.
	Grey,
	/// Link labels.
	Blue,
	/// Headers and strong emphasis.
	Bold,
	/// Unused by the pipeline but part of the palette.
	Italic,
	/// Unused by the pipeline but part of the palette.
	Inverse,
}

impl Style {
	/// Escape sequence that turns the style on.
	pub fn enter(self) -> &'static str {
		match self {
			Self::Red => "\x1b[31m",
			Self::Green => "\x1b[32m",
			Self::Cyan => "\x1b[36m",
			Self::Grey => "\x1b[90m",
			Self::Blue => "\x1b[34m",
			Self::Bold => "\x1b[1m",
			Self::Italic => "\x1b[3m",
			Self::Inverse => "\x1b[7m",
		}
	}

	/// Escape sequence that turns the style off.
	pub fn exit(self) -> &'static str {
		match self {
			Self::Red | Self::Green | Self::Cyan | Self::Grey | Self::Blue => "\x1b[39m",
			Self::Bold => "\x1b[22m",
			Self::Italic => "\x1b[23m",
			Self::Inverse => "\x1b[27m",
		}
	}

	/// Wrap `text` in this style.
	pub fn paint(self, text: &str) -> String {
		let mut out = String::with_capacity(text.len() + 10);
		out.push_str(self.enter());
		out.push_str(text);
		out.push_str(self.exit());
		out
	}

	/// Wrap each physical line of `text` separately, so a pager that shows a
	/// single line still sees balanced escapes.
	///
	/// A trailing newline in `text` is dropped, matching `str::lines`.
	pub fn paint_lines(self, text: &str) -> String {
		text.lines().map(|line| self.paint(line)).collect::<Vec<_>>().join("\n")
	}
}

/// Apply `outer` around `inner` around `text`, e.g. bold red.
pub fn paint2(outer: Style, inner: Style, text: &str) -> String {
	outer.paint(&inner.paint(text))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn paint_wraps_with_enter_and_exit() {
		assert_eq!(Style::Green.paint("x"), "\x1b[32mx\x1b[39m");
		assert_eq!(Style::Bold.paint("x"), "\x1b[1mx\x1b[22m");
	}

	#[test]
	fn paint_lines_styles_each_line() {
		assert_eq!(
			Style::Cyan.paint_lines("a\nb\n"),
			"\x1b[36ma\x1b[39m\n\x1b[36mb\x1b[39m"
		);
	}

	#[test]
	fn nested_paint_keeps_order() {
		assert_eq!(paint2(Style::Bold, Style::Red, "h"), "\x1b[1m\x1b[31mh\x1b[39m\x1b[22m");
	}
}
