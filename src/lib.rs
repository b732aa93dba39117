//! Core library for asmdoc, rendering a .NET assembly's public API as a single Markdown page.
//!
//! This crate provides the high-level `AsmDoc` API, which loads an assembly's metadata export
//! together with its XML documentation comments, assigns stable heading anchors to every
//! visible entity and writes one cross-linked document.

/// Reading of the JSON metadata export.
pub mod metadata;

/// Parsing of XML documentation comment files.
pub mod comments;

/// Rendering logic that converts metadata and comments into Markdown.
pub mod render;

/// Core API for asmdoc operations.
pub mod core_api;

pub use crate::core_api::{AsmDoc, AsmDocError, Diagnostic, Rendered, Renderer, Result};
