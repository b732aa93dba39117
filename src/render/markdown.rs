//! Rich-text fragments to Markdown.
//!
//! Text is HTML-escaped exactly once, where it is emitted. Code keeps its characters
//! verbatim since Markdown code spans and fences never interpret markup.

use super::anchors::AnchorMap;
use crate::comments::{Fragment, Node};

/// Language tag on every fenced code block.
pub const CODE_LANGUAGE: &str = "csharp";

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			_ => out.push(ch),
		}
	}
	out
}

/// Link to an in-document anchor: ``[ `Text` ](#anchor)``.
pub fn anchor_link(text: &str, anchor: &str) -> String {
	format!("[ `{text}` ](#{anchor})")
}

/// Wrap code in a fence tagged with [`CODE_LANGUAGE`].
pub fn fenced(code: &str) -> String {
	format!("```{CODE_LANGUAGE}\n{code}\n```")
}

/// Remove the common indentation of a code sample.
///
/// Blank lines neither count towards the common indentation nor survive at either end;
/// blank lines inside the sample are kept.
pub fn dedent(code: &str) -> Vec<String> {
	let lines: Vec<&str> = code.lines().collect();
	let indent = lines
		.iter()
		.filter(|line| !line.trim().is_empty())
		.map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
		.min()
		.unwrap_or(0);

	let mut out: Vec<String> = lines
		.iter()
		.map(|line| line.chars().skip(indent).collect::<String>().trim_end().to_string())
		.collect();

	while out.last().is_some_and(|line| line.is_empty()) {
		out.pop();
	}
	let leading = out.iter().take_while(|line| line.is_empty()).count();
	out.drain(..leading);
	out
}

/// Renders fragments against a fixed anchor map.
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer<'a> {
	anchors: &'a AnchorMap,
	drop_blank_lines: bool,
}

impl<'a> TextRenderer<'a> {
	/// Create a renderer resolving references through `anchors`.
	pub fn new(anchors: &'a AnchorMap) -> Self {
		Self {
			anchors,
			drop_blank_lines: false,
		}
	}

	/// Drop blank lines from block-mode text.
	pub fn with_blank_line_trim(mut self, drop_blank_lines: bool) -> Self {
		self.drop_blank_lines = drop_blank_lines;
		self
	}

	/// Render a whole fragment.
	pub fn render(&self, fragment: &Fragment, inline: bool) -> String {
		self.render_nodes(&fragment.nodes, inline)
	}

	/// Render a node sequence.
	pub fn render_nodes(&self, nodes: &[Node], inline: bool) -> String {
		nodes.iter().map(|node| self.render_node(node, inline)).collect()
	}

	/// Render a single node.
	pub fn render_node(&self, node: &Node, inline: bool) -> String {
		match node {
			Node::Text(text) => self.render_text(text, inline),
			Node::Paragraph(children) => format!("\n\n{}", self.render_nodes(children, false)),
			Node::CodeBlock(code) => format!("\n{}\n", fenced(&dedent(code).join("\n"))),
			Node::InlineCode(code) => format!("` {} `", collapse_lines(code)),
			Node::Reference { target, children } => self.render_reference(target, children),
			Node::Tag {
				name,
				attributes,
				children,
			} => render_tag(name, attributes, &self.render_nodes(children, false)),
		}
	}

	fn render_reference(&self, target: &str, children: &[Node]) -> String {
		let inner = self.render_nodes(children, true);
		let display = if inner.trim().is_empty() {
			escape_html(target)
		} else {
			inner.trim().to_string()
		};
		match self.anchors.get(target) {
			Some(anchor) => anchor_link(&display, anchor),
			None => format!(" {display} "),
		}
	}

	fn render_text(&self, text: &str, inline: bool) -> String {
		let escaped = escape_html(text);
		if inline {
			return escaped.replace(['\r', '\n'], "").trim().to_string();
		}
		escaped
			.lines()
			.map(str::trim)
			.filter(|line| !(self.drop_blank_lines && line.is_empty()))
			.collect::<Vec<_>>()
			.join("\n")
	}
}

/// Join the lines of inline code with single spaces.
fn collapse_lines(code: &str) -> String {
	code.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.collect::<Vec<_>>()
		.join(" ")
}

fn render_tag(name: &str, attributes: &[(String, String)], body: &str) -> String {
	let mut out = format!("<{name}");
	for (key, value) in attributes {
		out.push_str(&format!(" {key}=\"{}\"", escape_html(value)));
	}
	if body.is_empty() {
		out.push_str(" />");
	} else {
		out.push_str(&format!(">{body}</{name}>"));
	}
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::comments::CommentDocument;

	fn text(value: &str) -> Node {
		Node::Text(value.into())
	}

	fn anchors_with(key: &str) -> AnchorMap {
		let doc = crate::metadata::parse_assembly(&format!(
			r#"{{"format_version": 1, "name": "Demo", "types": [{{"namespace": "Demo", "name": "{key}", "visibility": "public"}}]}}"#
		))
		.unwrap();
		let outline = crate::render::outline::Outline::new(&doc);
		crate::render::anchors::assign(&outline, &[])
	}

	#[test]
	fn dedents_code_blocks() {
		assert_eq!(dedent("    int x = 1;\n\n    return x;"), ["int x = 1;", "", "return x;"]);
		assert_eq!(
			dedent("\n\n      if (a)\n          b();   \n\n"),
			["if (a)", "    b();"]
		);
	}

	#[test]
	fn dedent_is_idempotent() {
		let once = dedent("  a\n    b\n\n  c").join("\n");
		assert_eq!(dedent(&once).join("\n"), once);
	}

	#[test]
	fn renders_code_block_fence() {
		let map = AnchorMap::default();
		let rendered = TextRenderer::new(&map).render_node(&Node::CodeBlock("\n    var x = 1;\n    ".into()), false);
		assert_eq!(rendered, "\n```csharp\nvar x = 1;\n```\n");
	}

	#[test]
	fn inline_code_collapses_lines() {
		let map = AnchorMap::default();
		let renderer = TextRenderer::new(&map);
		assert_eq!(renderer.render_node(&Node::InlineCode("a\nb".into()), true), "` a b `");
	}

	#[test]
	fn escapes_text_once() {
		let map = AnchorMap::default();
		let renderer = TextRenderer::new(&map);
		let rendered = renderer.render_node(&text("a < b && \"c\" > d"), true);
		assert_eq!(rendered, "a &lt; b &amp;&amp; &quot;c&quot; &gt; d");
		assert!(!rendered.contains('<') && !rendered.contains('>') && !rendered.contains('"'));
	}

	#[test]
	fn block_text_trims_each_line() {
		let map = AnchorMap::default();
		let raw = text("\n    First line.\n\n    Second line.\n    ");
		assert_eq!(
			TextRenderer::new(&map).render_node(&raw, false),
			"\nFirst line.\n\nSecond line.\n"
		);
		assert_eq!(
			TextRenderer::new(&map)
				.with_blank_line_trim(true)
				.render_node(&raw, false),
			"First line.\nSecond line."
		);
		assert_eq!(TextRenderer::new(&map).render_node(&raw, true), "First line.    Second line.");
	}

	#[test]
	fn resolves_references() {
		let map = anchors_with("Widget");
		let renderer = TextRenderer::new(&map);
		let linked = Node::Reference {
			target: "T:Demo.Widget".into(),
			children: Vec::new(),
		};
		assert_eq!(renderer.render_node(&linked, true), "[ `T:Demo.Widget` ](#widget-class)");

		let labelled = Node::Reference {
			target: "T:Demo.Widget".into(),
			children: vec![text(" the widget ")],
		};
		assert_eq!(renderer.render_node(&labelled, true), "[ `the widget` ](#widget-class)");
	}

	#[test]
	fn unresolved_references_stay_plain() {
		let map = anchors_with("Widget");
		let renderer = TextRenderer::new(&map);
		let missing = Node::Reference {
			target: "T:System.String".into(),
			children: Vec::new(),
		};
		let rendered = renderer.render_node(&missing, true);
		assert_eq!(rendered, " T:System.String ");
		assert!(!rendered.contains("](#"));
	}

	#[test]
	fn passes_unknown_tags_through() {
		let map = AnchorMap::default();
		let node = Node::Tag {
			name: "list".into(),
			attributes: vec![("type".into(), "bullet".into())],
			children: vec![Node::Tag {
				name: "item".into(),
				attributes: Vec::new(),
				children: vec![text("one")],
			}],
		};
		assert_eq!(
			TextRenderer::new(&map).render_node(&node, true),
			"<list type=\"bullet\"><item>one</item></list>"
		);
		let empty = Node::Tag {
			name: "br".into(),
			attributes: Vec::new(),
			children: Vec::new(),
		};
		assert_eq!(TextRenderer::new(&map).render_node(&empty, false), "<br />");
	}

	#[test]
	fn renders_parsed_summary() {
		let doc = CommentDocument::parse(
			r#"<doc><members><member name="T:Demo.Widget"><summary>
				Makes <c>widgets</c>.
				<para>Second paragraph.</para>
			</summary></member></members></doc>"#,
		)
		.unwrap();
		let map = AnchorMap::default();
		let summary = doc.get("T:Demo.Widget").unwrap().summary.as_ref().unwrap();
		let rendered = TextRenderer::new(&map).with_blank_line_trim(true).render(summary, false);
		assert_eq!(rendered, "Makes` widgets `.\n\nSecond paragraph.");
	}
}
