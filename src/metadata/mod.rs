//! Read-only model of an assembly's type and member declarations.
//!
//! The model mirrors what a CLI metadata reader exposes: raw metadata names (``List`1``),
//! accessibility flags, method semantics and custom attributes. Decoding the PE image
//! itself is delegated to an exporter; this crate consumes its JSON output.

mod reader;

use serde::Deserialize;

pub use self::reader::{FORMAT_VERSION, MetadataError, parse_assembly, read_assembly};

/// Metadata name of the attribute that hides an otherwise visible entity.
const EDITOR_BROWSABLE: &str = "System.ComponentModel.EditorBrowsableAttribute";

/// Metadata name of the attribute marking extension methods.
const EXTENSION: &str = "System.Runtime.CompilerServices.ExtensionAttribute";

/// Metadata name of the attribute marking `in` parameters.
const IS_READ_ONLY: &str = "System.Runtime.CompilerServices.IsReadOnlyAttribute";

/// A loaded assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct Assembly {
	/// Version of the export format.
	pub format_version: u32,
	/// Simple assembly name.
	pub name: String,
	/// Four-part assembly version.
	#[serde(default)]
	pub version: String,
	/// Assembly-level custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
	/// Every type defined in the assembly, nested types included.
	#[serde(default)]
	pub types: Vec<TypeDef>,
}

impl Assembly {
	/// First positional argument of the named assembly attribute.
	pub fn attribute_value(&self, type_name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|attr| attr.type_name == type_name)
			.and_then(|attr| attr.arguments.first())
			.map(String::as_str)
	}
}

/// Declared accessibility of a type or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
	/// `public`
	Public,
	/// `protected`
	Protected,
	/// `protected internal`
	ProtectedInternal,
	/// `internal`
	Internal,
	/// `private protected`
	PrivateProtected,
	/// `private`
	Private,
}

impl Visibility {
	/// Whether code outside the assembly can see an entity with this accessibility.
	pub fn is_visible(self) -> bool {
		matches!(self, Self::Public | Self::Protected | Self::ProtectedInternal)
	}

	/// C# keyword form.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Public => "public",
			Self::Protected => "protected",
			Self::ProtectedInternal => "protected internal",
			Self::Internal => "internal",
			Self::PrivateProtected => "private protected",
			Self::Private => "private",
		}
	}

	/// Reach outside the assembly; higher is wider.
	pub fn reach(self) -> u8 {
		match self {
			Self::Public => 3,
			Self::ProtectedInternal => 2,
			Self::Protected => 1,
			Self::Internal | Self::PrivateProtected | Self::Private => 0,
		}
	}
}

/// A custom attribute applied to an entity.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomAttribute {
	/// Full metadata name of the attribute type.
	pub type_name: String,
	/// Positional constructor arguments, already rendered as text.
	#[serde(default)]
	pub arguments: Vec<String>,
}

/// Widest visible accessor; the earlier one wins a tie.
fn most_visible<'a>(accessors: impl Iterator<Item = &'a AccessorDef>) -> Option<&'a AccessorDef> {
	accessors
		.filter(|accessor| accessor.visibility.is_visible())
		.fold(None, |best: Option<&AccessorDef>, accessor| match best {
			Some(best) if best.visibility.reach() >= accessor.visibility.reach() => Some(best),
			_ => Some(accessor),
		})
}

/// Whether an attribute list carries the `EditorBrowsable(Never)` opt-out marker.
fn hides(attributes: &[CustomAttribute]) -> bool {
	attributes.iter().any(|attr| {
		attr.type_name == EDITOR_BROWSABLE
			&& attr
				.arguments
				.first()
				.is_some_and(|arg| arg == "1" || arg.ends_with("Never"))
	})
}

fn has_attribute(attributes: &[CustomAttribute], type_name: &str) -> bool {
	attributes.iter().any(|attr| attr.type_name == type_name)
}

/// Kind of a type definition, derived from its flags and base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
	/// Reference type.
	Class,
	/// Value type.
	Struct,
	/// Interface.
	Interface,
	/// Enumeration.
	Enum,
	/// Delegate.
	Delegate,
}

impl TypeKind {
	/// Keyword used in headings and declarations.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::Class => "class",
			Self::Struct => "struct",
			Self::Interface => "interface",
			Self::Enum => "enum",
			Self::Delegate => "delegate",
		}
	}
}

/// A type defined in the assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
	/// Namespace; empty for the global namespace. Nested types share their outer type's.
	#[serde(default)]
	pub namespace: String,
	/// Raw names of the enclosing types, outermost first.
	#[serde(default)]
	pub enclosing: Vec<String>,
	/// Raw metadata name, including any arity suffix.
	pub name: String,
	/// Declared accessibility.
	pub visibility: Visibility,
	/// Interface flag.
	#[serde(default)]
	pub is_interface: bool,
	/// Abstract flag (static classes are abstract and sealed).
	#[serde(default)]
	pub is_abstract: bool,
	/// Sealed flag.
	#[serde(default)]
	pub is_sealed: bool,
	/// Base type, absent for interfaces and `System.Object`.
	#[serde(default)]
	pub base_type: Option<TypeSig>,
	/// Directly implemented interfaces.
	#[serde(default)]
	pub interfaces: Vec<TypeSig>,
	/// Generic parameters, including those inherited from enclosing types.
	#[serde(default)]
	pub generic_params: Vec<GenericParam>,
	/// Fields.
	#[serde(default)]
	pub fields: Vec<FieldDef>,
	/// Properties.
	#[serde(default)]
	pub properties: Vec<PropertyDef>,
	/// Events.
	#[serde(default)]
	pub events: Vec<EventDef>,
	/// Methods, including constructors and accessors.
	#[serde(default)]
	pub methods: Vec<MethodDef>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl TypeDef {
	/// Classify the type from its flags and base type.
	pub fn kind(&self) -> TypeKind {
		if self.is_interface {
			return TypeKind::Interface;
		}
		match self.base_type.as_ref().and_then(TypeSig::full_name).as_deref() {
			Some("System.Enum") => TypeKind::Enum,
			Some("System.MulticastDelegate") => TypeKind::Delegate,
			Some("System.ValueType") => TypeKind::Struct,
			_ => TypeKind::Class,
		}
	}

	/// Full metadata name, `Ns.Outer.Inner` with raw arity suffixes.
	pub fn full_name(&self) -> String {
		let mut segments: Vec<&str> = Vec::with_capacity(self.enclosing.len() + 2);
		if !self.namespace.is_empty() {
			segments.push(&self.namespace);
		}
		segments.extend(self.enclosing.iter().map(String::as_str));
		segments.push(&self.name);
		segments.join(".")
	}

	/// Full metadata name of the directly enclosing type, if nested.
	pub fn enclosing_full_name(&self) -> Option<String> {
		if self.enclosing.is_empty() {
			return None;
		}
		let mut segments: Vec<&str> = Vec::with_capacity(self.enclosing.len() + 1);
		if !self.namespace.is_empty() {
			segments.push(&self.namespace);
		}
		segments.extend(self.enclosing.iter().map(String::as_str));
		Some(segments.join("."))
	}

	/// Whether the type carries the opt-out marker.
	pub fn is_hidden(&self) -> bool {
		hides(&self.attributes)
	}

	/// `static class`: abstract and sealed.
	pub fn is_static(&self) -> bool {
		self.is_abstract && self.is_sealed
	}

	/// The delegate's `Invoke` method.
	pub fn invoke_method(&self) -> Option<&MethodDef> {
		self.methods.iter().find(|method| method.name == "Invoke")
	}

	/// Enum underlying type, read from the special `value__` field.
	pub fn enum_underlying_type(&self) -> Option<&TypeSig> {
		self.fields
			.iter()
			.find(|field| field.special_name && field.name == "value__")
			.map(|field| &field.field_type)
	}
}

/// Declared variance of a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
	/// Invariant.
	#[default]
	None,
	/// `out T`
	Covariant,
	/// `in T`
	Contravariant,
}

/// A generic parameter with its constraints.
#[derive(Debug, Clone, Deserialize)]
pub struct GenericParam {
	/// Parameter name.
	pub name: String,
	/// Variance annotation (interfaces and delegates only).
	#[serde(default)]
	pub variance: Variance,
	/// `class` constraint.
	#[serde(default)]
	pub reference_type: bool,
	/// `struct` constraint.
	#[serde(default)]
	pub value_type: bool,
	/// `new()` constraint.
	#[serde(default)]
	pub default_constructor: bool,
	/// Type constraints.
	#[serde(default)]
	pub constraints: Vec<TypeSig>,
}

impl GenericParam {
	/// Whether any constraint applies.
	pub fn is_constrained(&self) -> bool {
		self.reference_type || self.value_type || self.default_constructor || !self.constraints.is_empty()
	}
}

/// Owner of a generic parameter referenced from a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericOwner {
	/// Declared on a type.
	Type,
	/// Declared on a method.
	Method,
}

/// A type reference appearing in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSig {
	/// A type definition or reference, possibly a constructed generic.
	Named {
		/// Namespace.
		#[serde(default)]
		namespace: String,
		/// Raw names of the enclosing types, outermost first.
		#[serde(default)]
		enclosing: Vec<String>,
		/// Raw metadata name.
		name: String,
		/// Generic arguments for the whole nesting chain, outermost type first.
		#[serde(default)]
		generic_args: Vec<TypeSig>,
	},
	/// A reference to a generic parameter.
	GenericParam {
		/// Parameter name.
		name: String,
		/// Ordinal within the owner.
		position: usize,
		/// Declaring entity.
		owner: GenericOwner,
	},
	/// Single or multi-dimensional array.
	Array {
		/// Element type.
		element: Box<TypeSig>,
		/// Number of dimensions.
		#[serde(default = "default_rank")]
		rank: u32,
	},
	/// Unmanaged pointer.
	Pointer {
		/// Pointee type.
		element: Box<TypeSig>,
	},
	/// Managed reference (`ref`, `out`, `in`).
	ByRef {
		/// Referenced type.
		element: Box<TypeSig>,
	},
}

fn default_rank() -> u32 {
	1
}

impl TypeSig {
	/// Full metadata name of a non-generic-instance named type.
	pub fn full_name(&self) -> Option<String> {
		match self {
			Self::Named {
				namespace,
				enclosing,
				name,
				..
			} => {
				let mut segments: Vec<&str> = Vec::new();
				if !namespace.is_empty() {
					segments.push(namespace);
				}
				segments.extend(enclosing.iter().map(String::as_str));
				segments.push(name);
				Some(segments.join("."))
			}
			_ => None,
		}
	}

	/// Strip a managed reference, if any.
	pub fn strip_by_ref(&self) -> &TypeSig {
		match self {
			Self::ByRef { element } => element,
			other => other,
		}
	}
}

/// A field.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
	/// Field name.
	pub name: String,
	/// Field type.
	pub field_type: TypeSig,
	/// Declared accessibility.
	pub visibility: Visibility,
	/// `static`
	#[serde(default)]
	pub is_static: bool,
	/// `const`
	#[serde(default)]
	pub is_literal: bool,
	/// `readonly`
	#[serde(default)]
	pub is_init_only: bool,
	/// Special-name flag, set on the enum `value__` field.
	#[serde(default)]
	pub special_name: bool,
	/// Constant value rendered as source text.
	#[serde(default)]
	pub constant: Option<String>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl FieldDef {
	/// Visible, listed and not hidden.
	pub fn is_documented(&self) -> bool {
		self.visibility.is_visible() && !self.special_name && !hides(&self.attributes)
	}
}

/// Method-level modifiers shared by methods and accessors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MethodModifiers {
	/// `static`
	pub is_static: bool,
	/// `abstract`
	pub is_abstract: bool,
	/// Virtual slot.
	pub is_virtual: bool,
	/// Introduces a new virtual slot (virtual but not `override`).
	pub is_new_slot: bool,
	/// `sealed` (final)
	pub is_final: bool,
}

/// A property or event accessor.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessorDef {
	/// Declared accessibility.
	pub visibility: Visibility,
	/// Modifiers.
	#[serde(default)]
	pub modifiers: MethodModifiers,
	/// `init` accessor instead of `set`.
	#[serde(default)]
	pub is_init: bool,
}

/// A property, possibly an indexer.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDef {
	/// Property name; `Item` for default indexers.
	pub name: String,
	/// Property type.
	pub property_type: TypeSig,
	/// Indexer parameters; empty for ordinary properties.
	#[serde(default)]
	pub parameters: Vec<ParamDef>,
	/// Getter.
	#[serde(default)]
	pub getter: Option<AccessorDef>,
	/// Setter.
	#[serde(default)]
	pub setter: Option<AccessorDef>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl PropertyDef {
	/// Whether the property is an indexer.
	pub fn is_indexer(&self) -> bool {
		!self.parameters.is_empty()
	}

	/// Accessors present, getter first.
	pub fn accessors(&self) -> impl Iterator<Item = &AccessorDef> {
		self.getter.iter().chain(self.setter.iter())
	}

	/// The most visible accessor, which carries the property's own modifiers.
	pub fn primary_accessor(&self) -> Option<&AccessorDef> {
		most_visible(self.accessors())
	}

	/// Visible, listed and not hidden.
	pub fn is_documented(&self) -> bool {
		self.primary_accessor().is_some() && !hides(&self.attributes)
	}
}

/// An event.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDef {
	/// Event name.
	pub name: String,
	/// Handler delegate type.
	pub event_type: TypeSig,
	/// `add` accessor.
	#[serde(default)]
	pub adder: Option<AccessorDef>,
	/// `remove` accessor.
	#[serde(default)]
	pub remover: Option<AccessorDef>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl EventDef {
	/// The most visible accessor, which carries the event's own modifiers.
	pub fn primary_accessor(&self) -> Option<&AccessorDef> {
		most_visible(self.adder.iter().chain(self.remover.iter()))
	}

	/// Visible, listed and not hidden.
	pub fn is_documented(&self) -> bool {
		self.primary_accessor().is_some() && !hides(&self.attributes)
	}
}

/// A method or constructor.
#[derive(Debug, Clone, Deserialize)]
pub struct MethodDef {
	/// Raw metadata name (`.ctor`, `op_Equality`, `get_Item`, ...).
	pub name: String,
	/// Declared accessibility.
	pub visibility: Visibility,
	/// Modifiers.
	#[serde(default)]
	pub modifiers: MethodModifiers,
	/// Special-name flag (constructors, operators, accessors).
	#[serde(default)]
	pub special_name: bool,
	/// Method generic parameters.
	#[serde(default)]
	pub generic_params: Vec<GenericParam>,
	/// Parameters.
	#[serde(default)]
	pub parameters: Vec<ParamDef>,
	/// Return type.
	pub return_type: TypeSig,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl MethodDef {
	/// Instance or static constructor.
	pub fn is_constructor(&self) -> bool {
		self.name == ".ctor" || self.name == ".cctor"
	}

	/// User-defined operator or conversion.
	pub fn is_operator(&self) -> bool {
		self.special_name && self.name.starts_with("op_")
	}

	/// `op_Implicit` / `op_Explicit`.
	pub fn is_conversion(&self) -> bool {
		self.name == "op_Implicit" || self.name == "op_Explicit"
	}

	/// Property or event accessor, never listed on its own.
	pub fn is_accessor(&self) -> bool {
		self.special_name && !self.is_constructor() && !self.is_operator()
	}

	/// Extension method: first parameter is the implicitly bound `this`.
	pub fn is_extension(&self) -> bool {
		has_attribute(&self.attributes, EXTENSION) && !self.parameters.is_empty()
	}

	/// Visible, listed and not hidden.
	pub fn is_documented(&self) -> bool {
		self.visibility.is_visible()
			&& self.name != ".cctor"
			&& !self.is_accessor()
			&& !hides(&self.attributes)
	}
}

/// Direction keyword of a by-reference parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamModifier {
	/// `in`
	In,
	/// `out`
	Out,
	/// `ref`
	Ref,
}

impl ParamModifier {
	/// Keyword form.
	pub fn keyword(self) -> &'static str {
		match self {
			Self::In => "in",
			Self::Out => "out",
			Self::Ref => "ref",
		}
	}
}

/// A method, indexer or delegate parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDef {
	/// Parameter name.
	pub name: String,
	/// Declared type; `by_ref` for `ref`, `out` and `in` parameters.
	pub param_type: TypeSig,
	/// `[In]` flag.
	#[serde(default)]
	pub is_in: bool,
	/// `[Out]` flag.
	#[serde(default)]
	pub is_out: bool,
	/// `params` array.
	#[serde(default)]
	pub is_params: bool,
	/// Default value rendered as source text.
	#[serde(default)]
	pub default_value: Option<String>,
	/// Custom attributes.
	#[serde(default)]
	pub attributes: Vec<CustomAttribute>,
}

impl ParamDef {
	/// Direction keyword for by-reference parameters.
	pub fn modifier(&self) -> Option<ParamModifier> {
		if !matches!(self.param_type, TypeSig::ByRef { .. }) {
			return None;
		}
		Some(if self.is_out && !self.is_in {
			ParamModifier::Out
		} else if self.is_in || has_attribute(&self.attributes, IS_READ_ONLY) {
			ParamModifier::In
		} else {
			ParamModifier::Ref
		})
	}
}
