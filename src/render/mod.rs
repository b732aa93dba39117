//! Rendering of an assembly's public surface into a single Markdown document.
//!
//! The pipeline runs in two passes over one [`outline::Outline`]: [`anchors::assign`]
//! hands every heading its slug, then [`core::Renderer`] writes the sections in the same
//! order, resolving cross-references against the finished anchor map.

/// Heading anchors.
pub mod anchors;
/// Renderer configuration and entry point.
pub mod core;
/// The documentable entity variants.
pub mod entity;
/// Per-section renderers.
pub mod items;
/// Rich-text fragments to Markdown.
pub mod markdown;
/// Display names and lookup keys.
pub mod names;
/// Visible entities in emission order.
pub mod outline;
/// Mutable state of a render pass.
pub mod state;
/// Declaration reconstruction.
pub mod syntax;
/// Small Markdown helpers.
pub mod utils;

pub use self::anchors::{AnchorMap, IdentityAssigner};
pub use self::core::{Diagnostic, Rendered, Renderer};
pub use self::entity::Entity;
pub use self::markdown::TextRenderer;
pub use self::names::NameOptions;
pub use self::outline::Outline;
