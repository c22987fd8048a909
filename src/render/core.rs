use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::style::{Style, paint2};
use super::wrap::{indent_lines, wrap};

/// Column width for paragraph reflow.
pub const PARAGRAPH_WIDTH: usize = 80;
/// Column width for list item reflow (leaves room for the bullet indent).
pub const LIST_ITEM_WIDTH: usize = 78;
/// Indentation applied to every line of a `pre` block.
pub const BLOCK_INDENT: &str = "    ";
/// Indentation applied to list item lines.
pub const LIST_INDENT: &str = "  ";
/// Inline code starting with this literal is a stability annotation.
pub const STABILITY_MARKER: &str = "Stability:";

/// A single named rewrite of the whole document text.
#[derive(Clone, Copy)]
pub struct Stage {
	/// Short identifier, used in logs and to look the stage up in tests.
	pub name: &'static str,
	/// The rewrite itself; must be a no-op on text without its markup.
	pub apply: fn(&str) -> String,
}

impl std::fmt::Debug for Stage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Stage").field("name", &self.name).finish()
	}
}

/// Pipeline stages in application order.
///
/// Later stages rely on earlier ones: list items must be reflowed before the
/// paragraph stage sees stray `<p>` tags, and entities are decoded only after
/// every tag has been consumed so a decoded `<` can never look like markup.
pub const STAGES: &[Stage] = &[
	Stage { name: "comments", apply: strip_comments },
	Stage { name: "code", apply: style_code },
	Stage { name: "pre", apply: indent_pre },
	Stage { name: "lists", apply: bullet_lists },
	Stage { name: "paragraphs", apply: wrap_paragraphs },
	Stage { name: "links", apply: style_links },
	Stage { name: "em", apply: style_em },
	Stage { name: "strong", apply: style_strong },
	Stage { name: "headers", apply: style_headers },
	Stage { name: "entities", apply: unescape_entities },
];

/// Look up a pipeline stage by name.
pub fn stage(name: &str) -> Option<&'static Stage> {
	STAGES.iter().find(|stage| stage.name == name)
}

/// Convert converter-dialect HTML into terminal text.
pub fn render(html: &str) -> String {
	STAGES.iter().fold(html.to_string(), |text, stage| (stage.apply)(&text))
}

fn regex(pattern: &str) -> Regex {
	Regex::new(pattern).expect("pipeline regexes are valid")
}

static COMMENT: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<!--.*?-->\n{0,2}"));
static CODE: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<code(?:\s[^>]*)?>(.*?)</code>"));
static PRE: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<pre(?:\s[^>]*)?>(.*?)</pre>"));
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<li>\s*(?:<p>)?(.*?)(?:</p>)?\s*</li>"));
static PARA_TAG: Lazy<Regex> = Lazy::new(|| regex(r"</?p>"));
static LIST: Lazy<Regex> = Lazy::new(|| regex(r"(?s)\n?<(?:ul|ol)(?:\s[^>]*)?>(.*?)</(?:ul|ol)>(?:\n|$)"));
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<p>(.*?)</p>"));
static LINK: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<a(?:\s[^>]*)?>(.*?)</a>"));
static EM: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<em>(.*?)</em>"));
static STRONG: Lazy<Regex> = Lazy::new(|| regex(r"(?s)<strong>(.*?)</strong>"));
static HEADERS: Lazy<[Regex; 4]> = Lazy::new(|| {
	[1, 2, 3, 4].map(|level| regex(&format!(r"(?s)<h{level}(?:\s[^>]*)?>(.*?)</h{level}>")))
});
static ENTITY: Lazy<Regex> = Lazy::new(|| regex(r"&(lt|gt|amp|quot|#39);"));

fn replace(re: &Regex, text: &str, rewrite: impl Fn(&str) -> String) -> String {
	re.replace_all(text, |caps: &Captures<'_>| rewrite(caps.get(1).map_or("", |m| m.as_str())))
		.into_owned()
}

/// Drop HTML comments.
///
/// A comment block swallows the line break and blank line after it, so the
/// blocks around it keep exactly the separation they had without it.
pub fn strip_comments(text: &str) -> String {
	COMMENT.replace_all(text, "").into_owned()
}

/// Green code spans; stability annotations are grey instead.
pub fn style_code(text: &str) -> String {
	replace(&CODE, text, |code| {
		let style = if code.starts_with(STABILITY_MARKER) { Style::Grey } else { Style::Green };
		style.paint_lines(code)
	})
}

/// Indent every physical line of preformatted blocks.
pub fn indent_pre(text: &str) -> String {
	replace(&PRE, text, |block| indent_lines(block, BLOCK_INDENT))
}

/// Reflow list items behind a bullet and elide the list containers.
pub fn bullet_lists(text: &str) -> String {
	let items = replace(&LIST_ITEM, text, |item| {
		let item = PARA_TAG.replace_all(item, " ");
		let body = wrap(&item, LIST_ITEM_WIDTH).join("\n");
		let mut bullet = if body.is_empty() { LIST_INDENT.to_string() } else { indent_lines(&body, LIST_INDENT) };
		bullet.replace_range(0..1, "-");
		bullet
	});
	replace(&LIST, &items, |inner| inner.to_string())
}

/// Reflow paragraph text.
pub fn wrap_paragraphs(text: &str) -> String {
	replace(&PARAGRAPH, text, |para| wrap(para, PARAGRAPH_WIDTH).join("\n"))
}

/// Keep only the visible label of anchors.
pub fn style_links(text: &str) -> String {
	replace(&LINK, text, |label| Style::Blue.paint_lines(label))
}

/// `*emphasis*` in cyan.
pub fn style_em(text: &str) -> String {
	replace(&EM, text, |inner| {
		let star = Style::Cyan.paint("*");
		format!("{star}{}{star}", Style::Cyan.paint_lines(inner))
	})
}

/// `**strong**` in bold cyan.
pub fn style_strong(text: &str) -> String {
	replace(&STRONG, text, |inner| {
		let stars = paint2(Style::Bold, Style::Cyan, "**");
		let body = inner
			.lines()
			.map(|line| paint2(Style::Bold, Style::Cyan, line))
			.collect::<Vec<_>>()
			.join("\n");
		format!("{stars}{body}{stars}")
	})
}

/// Bold red `#`-prefixed headers; levels below the first get a blank line above.
pub fn style_headers(text: &str) -> String {
	HEADERS.iter().zip(1..).fold(text.to_string(), |text, (re, level)| {
		replace(re, &text, |title| {
			let marker = "#".repeat(level);
			let header = paint2(Style::Bold, Style::Red, &format!("{marker} {title}"));
			if level == 1 { header } else { format!("\n{header}") }
		})
	})
}

/// Decode the handful of entities the converter emits.
pub fn unescape_entities(text: &str) -> String {
	ENTITY
		.replace_all(text, |caps: &Captures<'_>| match &caps[1] {
			"lt" => "<",
			"gt" => ">",
			"amp" => "&",
			"quot" => "\"",
			_ => "'",
		})
		.into_owned()
}
