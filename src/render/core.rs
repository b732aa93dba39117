use std::fmt;

use super::anchors;
use super::outline::Outline;
use super::state::RenderState;
use crate::comments::CommentDocument;
use crate::metadata::Assembly;

/// Lowest and highest base heading level; members sit three levels below the base.
const HEADING_LEVELS: (usize, usize) = (1, 3);

/// Something worth reporting that did not stop the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// A visible entity has no documentation record.
	MissingDocs(String),
	/// A cross-reference points at no anchor and was rendered as plain text.
	UnresolvedReference(String),
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MissingDocs(key) => write!(f, "missing documentation for `{key}`"),
			Self::UnresolvedReference(key) => write!(f, "unresolved reference `{key}`"),
		}
	}
}

/// Output of a render pass.
#[derive(Debug, Clone)]
pub struct Rendered {
	/// The complete Markdown document.
	pub markdown: String,
	/// Lookup misses encountered on the way, in document order.
	pub diagnostics: Vec<Diagnostic>,
}

/// Configurable renderer that turns an assembly and its comments into Markdown.
#[derive(Debug, Clone)]
pub struct Renderer {
	/// Heading level of the assembly title.
	pub heading_level: usize,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// Create a new renderer with default configuration.
	pub fn new() -> Self {
		Self {
			heading_level: HEADING_LEVELS.0,
		}
	}

	/// Set the base heading level, clamped so member headings stay within `######`.
	pub fn with_heading_level(mut self, level: usize) -> Self {
		self.heading_level = level.clamp(HEADING_LEVELS.0, HEADING_LEVELS.1);
		self
	}

	/// Title of the document's top heading.
	pub fn assembly_title(assembly: &Assembly) -> String {
		format!("{} assembly", assembly.name)
	}

	/// Render an assembly into a Markdown document.
	///
	/// Anchors are assigned up front over the same outline the writer walks, so every
	/// link resolves to a heading emitted later in the same document.
	pub fn render(&self, assembly: &Assembly, comments: &CommentDocument) -> Rendered {
		let outline = Outline::new(assembly);
		let title = Self::assembly_title(assembly);
		let anchors = anchors::assign(&outline, &[title.as_str()]);

		let mut state = RenderState::new(self, assembly, comments, &outline, &anchors);
		state.render();
		let (markdown, diagnostics) = state.finish();
		Rendered {
			markdown,
			diagnostics,
		}
	}
}
