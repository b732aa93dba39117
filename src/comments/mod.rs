//! XML documentation comment files.
//!
//! A comment file maps documentation IDs (`T:Demo.Widget`, `M:Demo.Widget.Run(System.Int32)`)
//! to structured prose. Each section is parsed into a [`Fragment`] tree that the Markdown
//! renderer walks later; lookups by ID never fail, they simply return nothing.

/// Rich-text fragment tree.
pub mod fragment;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

pub use self::fragment::{Fragment, Node};

/// Errors raised while loading a comment file.
#[derive(Debug, Error)]
pub enum CommentError {
	/// The comment file could not be read.
	#[error("failed to read comments from {path}: {source}")]
	Io {
		/// Path that failed.
		path: String,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// The file is not well-formed XML.
	#[error("malformed comment file: {0}")]
	Malformed(#[from] roxmltree::Error),
	/// The root element is not `<doc>`.
	#[error("unexpected root element <{0}> in comment file (expected <doc>)")]
	UnexpectedRoot(String),
}

/// Documentation attached to one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocRecord {
	/// `<summary>`
	pub summary: Option<Fragment>,
	/// `<remarks>`
	pub remarks: Option<Fragment>,
	/// `<example>`
	pub example: Option<Fragment>,
	/// `<returns>`
	pub returns: Option<Fragment>,
	/// `<value>`
	pub value: Option<Fragment>,
	/// Every `<seealso>`, as reference nodes.
	pub see_also: Option<Fragment>,
	/// `<param name="...">` in declaration order.
	pub params: Vec<(String, Fragment)>,
	/// `<typeparam name="...">` in declaration order.
	pub type_params: Vec<(String, Fragment)>,
	/// `<exception cref="...">` in declaration order.
	pub exceptions: Vec<(String, Fragment)>,
}

impl DocRecord {
	/// Description of the named parameter.
	pub fn param(&self, name: &str) -> Option<&Fragment> {
		lookup(&self.params, name)
	}

	/// Description of the named type parameter.
	pub fn type_param(&self, name: &str) -> Option<&Fragment> {
		lookup(&self.type_params, name)
	}
}

fn lookup<'a>(pairs: &'a [(String, Fragment)], name: &str) -> Option<&'a Fragment> {
	pairs
		.iter()
		.find(|(key, _)| key == name)
		.map(|(_, fragment)| fragment)
}

/// A parsed comment file.
#[derive(Debug, Clone, Default)]
pub struct CommentDocument {
	/// Assembly name declared by the file.
	pub assembly: Option<String>,
	members: HashMap<String, DocRecord>,
}

impl CommentDocument {
	/// A document with no records, used when no comment file exists.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Parse the contents of a comment file.
	pub fn parse(text: &str) -> Result<Self, CommentError> {
		let document = roxmltree::Document::parse(text)?;
		let root = document.root_element();
		if root.tag_name().name() != "doc" {
			return Err(CommentError::UnexpectedRoot(root.tag_name().name().to_string()));
		}

		let mut parsed = Self::empty();
		for section in root.children().filter(roxmltree::Node::is_element) {
			match section.tag_name().name() {
				"assembly" => {
					parsed.assembly = section
						.children()
						.find(|child| child.has_tag_name("name"))
						.and_then(|name| name.text())
						.map(|name| name.trim().to_string());
				}
				"members" => {
					for member in section.children().filter(|child| child.has_tag_name("member")) {
						if let Some(key) = member.attribute("name") {
							parsed.members.insert(key.to_string(), parse_record(member));
						}
					}
				}
				_ => {}
			}
		}
		Ok(parsed)
	}

	/// Read and parse a comment file from disk.
	pub async fn load(path: &Path) -> Result<Self, CommentError> {
		let text = tokio::fs::read_to_string(path)
			.await
			.map_err(|source| CommentError::Io {
				path: path.display().to_string(),
				source,
			})?;
		Self::parse(&text)
	}

	/// Documentation for the entity with the given documentation ID.
	pub fn get(&self, key: &str) -> Option<&DocRecord> {
		self.members.get(key)
	}

	/// Number of documented entities.
	pub fn len(&self) -> usize {
		self.members.len()
	}

	/// Whether the document has no records.
	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

fn parse_record(member: roxmltree::Node<'_, '_>) -> DocRecord {
	let mut record = DocRecord::default();
	let mut see_also = Vec::new();

	for section in member.children().filter(roxmltree::Node::is_element) {
		match section.tag_name().name() {
			"summary" => record.summary = Some(parse_fragment(section)),
			"remarks" => record.remarks = Some(parse_fragment(section)),
			"example" => record.example = Some(parse_fragment(section)),
			"returns" => record.returns = Some(parse_fragment(section)),
			"value" => record.value = Some(parse_fragment(section)),
			"seealso" => see_also.push(parse_node(section)),
			"param" => push_named(&mut record.params, section, "name"),
			"typeparam" => push_named(&mut record.type_params, section, "name"),
			"exception" => push_named(&mut record.exceptions, section, "cref"),
			_ => {}
		}
	}

	if !see_also.is_empty() {
		record.see_also = Some(Fragment::new(see_also));
	}
	record
}

fn push_named(pairs: &mut Vec<(String, Fragment)>, section: roxmltree::Node<'_, '_>, attribute: &str) {
	if let Some(name) = section.attribute(attribute) {
		pairs.push((name.to_string(), parse_fragment(section)));
	}
}

/// Parse the children of a section element.
fn parse_fragment(section: roxmltree::Node<'_, '_>) -> Fragment {
	Fragment::new(parse_children(section))
}

fn parse_children(element: roxmltree::Node<'_, '_>) -> Vec<Node> {
	element
		.children()
		.filter(|child| child.is_element() || child.is_text())
		.map(parse_node)
		.collect()
}

fn parse_node(node: roxmltree::Node<'_, '_>) -> Node {
	if node.is_text() {
		return Node::Text(node.text().unwrap_or_default().to_string());
	}

	let name = node.tag_name().name();
	match name {
		"para" => Node::Paragraph(parse_children(node)),
		"code" => Node::CodeBlock(raw_text(node)),
		"c" => Node::InlineCode(raw_text(node)),
		"paramref" | "typeparamref" => Node::InlineCode(node.attribute("name").unwrap_or_default().to_string()),
		"see" | "seealso" => {
			if let Some(target) = node.attribute("cref") {
				Node::Reference {
					target: target.to_string(),
					children: parse_children(node),
				}
			} else if let Some(keyword) = node.attribute("langword") {
				Node::InlineCode(keyword.to_string())
			} else if let Some(href) = node.attribute("href") {
				let mut children = parse_children(node);
				if children.is_empty() {
					children.push(Node::Text(href.to_string()));
				}
				Node::Tag {
					name: "a".to_string(),
					attributes: vec![("href".to_string(), href.to_string())],
					children,
				}
			} else {
				passthrough(node)
			}
		}
		_ => passthrough(node),
	}
}

fn passthrough(node: roxmltree::Node<'_, '_>) -> Node {
	Node::Tag {
		name: node.tag_name().name().to_string(),
		attributes: node
			.attributes()
			.map(|attr| (attr.name().to_string(), attr.value().to_string()))
			.collect(),
		children: parse_children(node),
	}
}

/// Character data of all descendant text nodes.
fn raw_text(node: roxmltree::Node<'_, '_>) -> String {
	node.descendants()
		.filter(roxmltree::Node::is_text)
		.filter_map(|text| text.text())
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const SAMPLE: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly>
        <name>Demo</name>
    </assembly>
    <members>
        <member name="T:Demo.Widget">
            <summary>A widget with <see cref="T:Demo.Gadget"/> support.</summary>
            <remarks>
                <para>First.</para>
                <code>
                    var w = new Widget();
                </code>
            </remarks>
            <typeparam name="T">Payload type.</typeparam>
            <seealso cref="T:Demo.Gadget">the gadget</seealso>
        </member>
        <member name="M:Demo.Widget.Run(System.Int32)">
            <param name="count">How many <c>times</c>.</param>
            <exception cref="T:System.ArgumentException">Bad <paramref name="count"/>.</exception>
            <returns><see langword="true"/> on success.</returns>
        </member>
    </members>
</doc>"#;

	#[test]
	fn parses_members_by_id() {
		let doc = CommentDocument::parse(SAMPLE).unwrap();
		assert_eq!(doc.assembly.as_deref(), Some("Demo"));
		assert_eq!(doc.len(), 2);
		assert!(doc.get("T:Demo.Missing").is_none());

		let widget = doc.get("T:Demo.Widget").unwrap();
		let summary = widget.summary.as_ref().unwrap();
		assert_eq!(
			summary.nodes,
			vec![
				Node::Text("A widget with ".into()),
				Node::Reference {
					target: "T:Demo.Gadget".into(),
					children: Vec::new(),
				},
				Node::Text(" support.".into()),
			]
		);
		assert!(widget.type_param("T").is_some());
		let see_also = widget.see_also.as_ref().unwrap();
		assert_eq!(see_also.nodes.len(), 1);
	}

	#[test]
	fn maps_inline_markup() {
		let doc = CommentDocument::parse(SAMPLE).unwrap();
		let run = doc.get("M:Demo.Widget.Run(System.Int32)").unwrap();
		let count = run.param("count").unwrap();
		assert!(count.nodes.contains(&Node::InlineCode("times".into())));
		let (cref, description) = &run.exceptions[0];
		assert_eq!(cref, "T:System.ArgumentException");
		assert!(description.nodes.contains(&Node::InlineCode("count".into())));
		let returns = run.returns.as_ref().unwrap();
		assert_eq!(returns.nodes[0], Node::InlineCode("true".into()));
	}

	#[test]
	fn keeps_code_indentation() {
		let doc = CommentDocument::parse(SAMPLE).unwrap();
		let remarks = doc.get("T:Demo.Widget").unwrap().remarks.as_ref().unwrap();
		let code = remarks
			.nodes
			.iter()
			.find_map(|node| match node {
				Node::CodeBlock(code) => Some(code.as_str()),
				_ => None,
			})
			.unwrap();
		assert!(code.contains("                    var w = new Widget();"));
	}

	#[test]
	fn rejects_foreign_roots() {
		let err = CommentDocument::parse("<html/>").unwrap_err();
		assert!(matches!(err, CommentError::UnexpectedRoot(name) if name == "html"));
	}

	#[test]
	fn rejects_malformed_xml() {
		let err = CommentDocument::parse("<doc><members></doc>").unwrap_err();
		assert!(matches!(err, CommentError::Malformed(_)));
	}
}
