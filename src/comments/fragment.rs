/// A parsed documentation section: the children of `<summary>`, `<remarks>`, and so on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
	/// Top-level nodes in document order.
	pub nodes: Vec<Node>,
}

impl Fragment {
	/// Wrap a node list.
	pub fn new(nodes: Vec<Node>) -> Self {
		Self { nodes }
	}

	/// Whether the fragment carries no visible content.
	pub fn is_blank(&self) -> bool {
		self.nodes.iter().all(Node::is_blank)
	}
}

/// One node of a documentation fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
	/// Character data, unescaped.
	Text(String),
	/// `<para>`
	Paragraph(Vec<Node>),
	/// `<code>`: raw, still indented as written in source.
	CodeBlock(String),
	/// `<c>`, `<paramref>`, `<typeparamref>`, `<see langword>`.
	InlineCode(String),
	/// `<see cref>` / `<seealso cref>`.
	Reference {
		/// Documentation ID of the target, e.g. `T:Demo.Widget`.
		target: String,
		/// Display text; empty when the element was self-closing.
		children: Vec<Node>,
	},
	/// Any other element, passed through as literal markup.
	Tag {
		/// Element name.
		name: String,
		/// Attributes in document order.
		attributes: Vec<(String, String)>,
		/// Content.
		children: Vec<Node>,
	},
}

impl Node {
	fn is_blank(&self) -> bool {
		match self {
			Self::Text(text) => text.trim().is_empty(),
			Self::Paragraph(children) => children.iter().all(Node::is_blank),
			_ => false,
		}
	}
}
