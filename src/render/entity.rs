//! The things that get a heading: namespaces, types and their members.

use crate::metadata::{EventDef, FieldDef, MethodDef, PropertyDef, TypeDef};

/// Display name used for the empty namespace.
pub const GLOBAL_NAMESPACE: &str = "global";

/// Any documentable program element.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
	/// A namespace, by name.
	Namespace(&'a str),
	/// A type definition.
	Type(&'a TypeDef),
	/// A field and its declaring type.
	Field(&'a TypeDef, &'a FieldDef),
	/// A property and its declaring type.
	Property(&'a TypeDef, &'a PropertyDef),
	/// An event and its declaring type.
	Event(&'a TypeDef, &'a EventDef),
	/// A method or constructor and its declaring type.
	Method(&'a TypeDef, &'a MethodDef),
}

impl<'a> Entity<'a> {
	/// Word appended to the entity's heading.
	pub fn kind_word(&self) -> &'static str {
		match self {
			Self::Namespace(_) => "namespace",
			Self::Type(ty) => ty.kind().keyword(),
			Self::Field(..) => "field",
			Self::Property(..) => "property",
			Self::Event(..) => "event",
			Self::Method(_, method) if method.is_constructor() => "constructor",
			Self::Method(..) => "method",
		}
	}

	/// Documentation-ID prefix letter.
	pub fn key_prefix(&self) -> char {
		match self {
			Self::Namespace(_) => 'N',
			Self::Type(_) => 'T',
			Self::Field(..) => 'F',
			Self::Property(..) => 'P',
			Self::Event(..) => 'E',
			Self::Method(..) => 'M',
		}
	}

	/// Type declaring a member; `None` for namespaces and types.
	pub fn declaring_type(&self) -> Option<&'a TypeDef> {
		match *self {
			Self::Namespace(_) | Self::Type(_) => None,
			Self::Field(ty, _) | Self::Property(ty, _) | Self::Event(ty, _) | Self::Method(ty, _) => {
				Some(ty)
			}
		}
	}
}
