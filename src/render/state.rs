use std::collections::HashSet;

use super::anchors::AnchorMap;
use super::core::{Diagnostic, Renderer};
use super::entity::Entity;
use super::markdown::{TextRenderer, anchor_link};
use super::names::{NameOptions, display_name, title, xml_key};
use super::outline::Outline;
use super::utils::{code_span, heading};
use crate::comments::{CommentDocument, DocRecord, Fragment, Node};
use crate::metadata::Assembly;

/// Mutable rendering context shared across the item renderers.
pub struct RenderState<'a> {
	/// Reference to the immutable renderer configuration.
	pub config: &'a Renderer,
	/// The assembly being documented.
	pub assembly: &'a Assembly,
	/// Documentation records, keyed by documentation ID.
	pub comments: &'a CommentDocument,
	/// Visible entities in emission order.
	pub outline: &'a Outline<'a>,
	/// Anchors assigned before writing started.
	pub anchors: &'a AnchorMap,
	/// Finished blocks, separated by blank lines on output.
	blocks: Vec<String>,
	diagnostics: Vec<Diagnostic>,
	reported: HashSet<String>,
}

impl<'a> RenderState<'a> {
	/// Create a new render state.
	pub fn new(
		config: &'a Renderer,
		assembly: &'a Assembly,
		comments: &'a CommentDocument,
		outline: &'a Outline<'a>,
		anchors: &'a AnchorMap,
	) -> Self {
		Self {
			config,
			assembly,
			comments,
			outline,
			anchors,
			blocks: Vec::new(),
			diagnostics: Vec::new(),
			reported: HashSet::new(),
		}
	}

	/// Render the whole document.
	pub fn render(&mut self) {
		super::items::render_document(self);
	}

	/// Joined document and the diagnostics gathered while writing it.
	pub fn finish(self) -> (String, Vec<Diagnostic>) {
		let mut markdown = self.blocks.join("\n\n");
		markdown.push('\n');
		(markdown, self.diagnostics)
	}

	/// Append a block; empty blocks are dropped.
	pub fn push(&mut self, block: impl Into<String>) {
		let block = block.into();
		if !block.trim().is_empty() {
			self.blocks.push(block);
		}
	}

	/// Append a heading `offset` levels below the assembly heading.
	pub fn push_heading(&mut self, offset: usize, text: &str) {
		let block = heading(self.config.heading_level + offset, text);
		self.push(block);
	}

	/// Append an entity's section heading.
	pub fn push_entity_heading(&mut self, offset: usize, entity: Entity<'_>) {
		self.push_heading(offset, &title(entity));
	}

	/// Fragment renderer bound to this document's anchors.
	pub fn text(&self) -> TextRenderer<'a> {
		TextRenderer::new(self.anchors).with_blank_line_trim(true)
	}

	/// Documentation record of an entity; a miss is noted, never fatal.
	pub fn record(&mut self, entity: Entity<'_>) -> Option<&'a DocRecord> {
		let key = xml_key(entity);
		let comments = self.comments;
		let record = comments.get(&key);
		if record.is_none() && !matches!(entity, Entity::Namespace(_)) {
			self.report(Diagnostic::MissingDocs(key));
		}
		record
	}

	/// Block rendering of a fragment; `None` when it has no visible content.
	pub fn prose(&mut self, fragment: Option<&Fragment>) -> Option<String> {
		let fragment = fragment.filter(|fragment| !fragment.is_blank())?;
		self.check_references(&fragment.nodes);
		Some(self.text().render(fragment, false).trim().to_string())
	}

	/// Inline rendering of a fragment, for table cells; empty when there is nothing to show.
	pub fn inline(&mut self, fragment: Option<&Fragment>) -> String {
		match fragment.filter(|fragment| !fragment.is_blank()) {
			Some(fragment) => {
				self.check_references(&fragment.nodes);
				self.text().render(fragment, true)
			}
			None => String::new(),
		}
	}

	/// Inline summary of an entity, looked up without reporting a miss.
	pub fn summary_of(&mut self, entity: Entity<'_>) -> String {
		let comments = self.comments;
		let summary = comments
			.get(&xml_key(entity))
			.and_then(|record| record.summary.as_ref());
		self.inline(summary)
	}

	/// Render one node inline, e.g. a single `seealso` entry or exception type.
	pub fn inline_node(&mut self, node: &Node) -> String {
		self.check_references(std::slice::from_ref(node));
		self.text().render_node(node, true).trim().to_string()
	}

	/// Link to an entity's section, or its plain name when it has no anchor.
	pub fn link(&self, entity: Entity<'_>) -> String {
		let text = display_name(entity, NameOptions::SIGNATURE | NameOptions::BRACES);
		match self.anchors.anchor_of(entity) {
			Some(anchor) => anchor_link(&text, anchor),
			None => code_span(&text),
		}
	}

	fn check_references(&mut self, nodes: &[Node]) {
		for node in nodes {
			match node {
				Node::Reference { target, children } => {
					if self.anchors.get(target).is_none() {
						self.report(Diagnostic::UnresolvedReference(target.clone()));
					}
					self.check_references(children);
				}
				Node::Paragraph(children) | Node::Tag { children, .. } => {
					self.check_references(children);
				}
				Node::Text(_) | Node::CodeBlock(_) | Node::InlineCode(_) => {}
			}
		}
	}

	fn report(&mut self, diagnostic: Diagnostic) {
		let key = diagnostic.to_string();
		if self.reported.insert(key) {
			self.diagnostics.push(diagnostic);
		}
	}
}
