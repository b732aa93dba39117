//! High-level API: locate inputs, load them, render and write the document.

/// Error helpers for the core API.
pub mod error;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub use self::error::{AsmDocError, Result};
use crate::comments::CommentDocument;
use crate::metadata::{Assembly, read_assembly};
pub use crate::render::{Diagnostic, Rendered, Renderer};

/// Extension of the comment file that sits next to an assembly.
const COMMENT_EXTENSION: &str = "xml";

/// Extension of the generated document.
const OUTPUT_EXTENSION: &str = "md";

/// AsmDoc turns an assembly's metadata export and its XML documentation comments into
/// one Markdown page.
///
/// The input is the metadata export (`Demo.json`). The comment file `Demo.xml` is looked
/// up next to it and then in every search directory; without one the document still
/// lists the whole public surface, just without prose.
#[derive(Debug, Clone)]
pub struct AsmDoc {
	/// Extra directories searched for the comment file.
	search_dirs: Vec<PathBuf>,

	/// Output path overriding `<input>.md`.
	output: Option<PathBuf>,

	/// Base heading level of the document.
	heading_level: usize,

	/// Whether to suppress output during processing.
	silent: bool,

	/// Whether to report every documentation and reference miss.
	verbose: bool,
}

impl Default for AsmDoc {
	fn default() -> Self {
		Self::new()
	}
}

impl AsmDoc {
	/// Creates a new AsmDoc instance with default configuration.
	pub fn new() -> Self {
		Self {
			search_dirs: Vec::new(),
			output: None,
			heading_level: 1,
			silent: false,
			verbose: false,
		}
	}

	/// Adds a directory searched for the comment file.
	pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.search_dirs.push(dir.into());
		self
	}

	/// Adds several directories searched for the comment file, in order.
	pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.search_dirs.extend(dirs.into_iter().map(Into::into));
		self
	}

	/// Writes the document to `path` instead of next to the input.
	pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
		self.output = path;
		self
	}

	/// Sets the heading level of the assembly title (clamped to 1..=3).
	pub fn with_heading_level(mut self, level: usize) -> Self {
		self.heading_level = level;
		self
	}

	/// Enables or disables silent mode, which suppresses output during processing.
	pub fn with_silent(mut self, silent: bool) -> Self {
		self.silent = silent;
		self
	}

	/// Enables or disables per-entity diagnostics.
	pub fn with_verbose(mut self, verbose: bool) -> Self {
		self.verbose = verbose;
		self
	}

	/// The renderer this instance is configured for.
	pub fn renderer(&self) -> Renderer {
		Renderer::new().with_heading_level(self.heading_level)
	}

	/// Locate the comment file for an input, if there is one.
	pub fn comment_path(&self, input: &Path) -> Option<PathBuf> {
		let file_name = input.with_extension(COMMENT_EXTENSION).file_name()?.to_owned();
		let beside = input.with_extension(COMMENT_EXTENSION);
		std::iter::once(beside)
			.chain(self.search_dirs.iter().map(|dir| dir.join(&file_name)))
			.find(|candidate| candidate.is_file())
	}

	/// Where the document for `input` is written.
	pub fn output_path(&self, input: &Path) -> Result<PathBuf> {
		if let Some(output) = &self.output {
			return Ok(output.clone());
		}
		if input.file_stem().is_none() {
			return Err(AsmDocError::InvalidInput(format!(
				"input path {} has no file name",
				input.display()
			)));
		}
		Ok(input.with_extension(OUTPUT_EXTENSION))
	}

	/// Load the metadata export and its comment file.
	///
	/// The two reads are independent and run concurrently; either failing aborts the load.
	pub async fn load(&self, input: &Path) -> Result<(Assembly, CommentDocument)> {
		let comment_path = self.comment_path(input);
		if !self.silent {
			eprintln!("Loading {}", input.display());
			match &comment_path {
				Some(path) => eprintln!("Loading {}", path.display()),
				None => eprintln!(
					"Warning: no comment file found for {}; rendering without documentation",
					input.display()
				),
			}
		}

		let metadata = async { read_assembly(input).await.map_err(AsmDocError::from) };
		let comments = async {
			match &comment_path {
				Some(path) => CommentDocument::load(path).await.map_err(AsmDocError::from),
				None => Ok(CommentDocument::empty()),
			}
		};
		let (assembly, comments) = tokio::try_join!(metadata, comments)?;

		if !self.silent
			&& let Some(declared) = &comments.assembly
			&& *declared != assembly.name
		{
			eprintln!(
				"Warning: comment file describes assembly `{declared}`, expected `{}`",
				assembly.name
			);
		}
		Ok((assembly, comments))
	}

	/// Render an already loaded assembly.
	pub fn render(&self, assembly: &Assembly, comments: &CommentDocument) -> Rendered {
		self.renderer().render(assembly, comments)
	}

	/// Load, render and write the document for `input`, returning the output path.
	pub async fn generate(&self, input: &Path) -> Result<PathBuf> {
		let output = self.output_path(input)?;
		let (assembly, comments) = self.load(input).await?;
		let rendered = self.render(&assembly, &comments);
		self.report(&rendered.diagnostics);

		write_document(&output, &rendered.markdown)?;
		if !self.silent {
			eprintln!("Wrote {}", output.display());
		}
		Ok(output)
	}

	fn report(&self, diagnostics: &[Diagnostic]) {
		if self.silent || diagnostics.is_empty() {
			return;
		}
		if self.verbose {
			for diagnostic in diagnostics {
				eprintln!("Warning: {diagnostic}");
			}
			return;
		}
		let missing = diagnostics
			.iter()
			.filter(|diagnostic| matches!(diagnostic, Diagnostic::MissingDocs(_)))
			.count();
		let unresolved = diagnostics.len() - missing;
		eprintln!(
			"Warning: {missing} undocumented entities, {unresolved} unresolved references (use --verbose for details)"
		);
	}
}

/// Create or truncate `path` and write the document through a flushed buffer.
fn write_document(path: &Path, markdown: &str) -> Result<()> {
	let file = File::create(path)?;
	let mut writer = BufWriter::new(file);
	writer.write_all(markdown.as_bytes())?;
	writer.flush()?;
	Ok(())
}
