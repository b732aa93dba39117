//! Display names, headings and lookup keys.
//!
//! Two naming schemes coexist. Display names read like C# source (`List<int>`,
//! `operator ==(Demo.Money, Demo.Money)`) and feed headings, signature keys and
//! declarations. Documentation IDs follow the comment-file convention
//! (``M:Demo.Box`1.Map``1(System.Func{`0,``0})``) and are what `cref` attributes
//! and `<member name>` use.

use bitflags::bitflags;

use super::entity::{Entity, GLOBAL_NAMESPACE};
use crate::metadata::{GenericOwner, GenericParam, MethodDef, ParamDef, PropertyDef, TypeDef, TypeSig};

bitflags! {
	/// Formatting switches for [`display_name`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq)]
	pub struct NameOptions: u8 {
		/// Parameter lists on methods.
		const SIGNATURE = 1;
		/// Leading return type (trailing, and always present, for conversion operators).
		const RETURN_TYPE = 1 << 1;
		/// Generic parameter lists on type and method names.
		const BRACES = 1 << 2;
		/// Parameter names, `this` on extension receivers, `params` and default values.
		const PARAM_NAMES = 1 << 3;
		/// Prefix with the namespace and declaring type.
		const QUALIFIED = 1 << 4;
	}
}

/// Well-known types rendered through their C# alias.
const TYPE_ALIASES: &[(&str, &str)] = &[
	("System.Object", "object"),
	("System.String", "string"),
	("System.Boolean", "bool"),
	("System.Char", "char"),
	("System.SByte", "sbyte"),
	("System.Byte", "byte"),
	("System.Int16", "short"),
	("System.UInt16", "ushort"),
	("System.Int32", "int"),
	("System.UInt32", "uint"),
	("System.Int64", "long"),
	("System.UInt64", "ulong"),
	("System.Single", "float"),
	("System.Double", "double"),
	("System.Decimal", "decimal"),
	("System.Void", "void"),
	("System.IntPtr", "nint"),
	("System.UIntPtr", "nuint"),
];

/// Operator method names and their source form.
const OPERATOR_NAMES: &[(&str, &str)] = &[
	("op_Equality", "operator =="),
	("op_Inequality", "operator !="),
	("op_LessThan", "operator <"),
	("op_GreaterThan", "operator >"),
	("op_LessThanOrEqual", "operator <="),
	("op_GreaterThanOrEqual", "operator >="),
	("op_Addition", "operator +"),
	("op_Subtraction", "operator -"),
	("op_Multiply", "operator *"),
	("op_Division", "operator /"),
	("op_Modulus", "operator %"),
	("op_BitwiseAnd", "operator &"),
	("op_BitwiseOr", "operator |"),
	("op_ExclusiveOr", "operator ^"),
	("op_LeftShift", "operator <<"),
	("op_RightShift", "operator >>"),
	("op_UnsignedRightShift", "operator >>>"),
	("op_UnaryPlus", "operator +"),
	("op_UnaryNegation", "operator -"),
	("op_LogicalNot", "operator !"),
	("op_OnesComplement", "operator ~"),
	("op_Increment", "operator ++"),
	("op_Decrement", "operator --"),
	("op_True", "operator true"),
	("op_False", "operator false"),
	("op_Implicit", "implicit operator"),
	("op_Explicit", "explicit operator"),
];

/// C# alias for a well-known type.
pub fn type_alias(full_name: &str) -> Option<&'static str> {
	TYPE_ALIASES
		.iter()
		.find(|(name, _)| *name == full_name)
		.map(|(_, alias)| *alias)
}

/// Source form of an operator method name.
pub fn operator_name(method_name: &str) -> Option<&'static str> {
	OPERATOR_NAMES
		.iter()
		.find(|(name, _)| *name == method_name)
		.map(|(_, source)| *source)
}

/// Split a raw metadata name into its base and generic arity: ``Dictionary`2`` → (`Dictionary`, 2).
pub fn split_arity(raw: &str) -> (&str, usize) {
	match raw.rsplit_once('`') {
		Some((base, arity)) => match arity.parse() {
			Ok(arity) => (base, arity),
			Err(_) => (raw, 0),
		},
		None => (raw, 0),
	}
}

/// Raw segments of a nesting chain paired with the generic items each one owns.
///
/// Metadata hands every generic parameter (or argument) of the chain to the innermost
/// type; the arity suffix of each segment says how many belong to it. Leftovers that
/// no suffix accounts for stay on the innermost segment.
fn distribute<'s, 'g, G>(segments: &[&'s str], generics: &'g [G]) -> Vec<(&'s str, &'g [G])> {
	let mut rest = generics;
	let mut out = Vec::with_capacity(segments.len());
	for (index, raw) in segments.iter().enumerate() {
		let (base, arity) = split_arity(raw);
		let take = if index + 1 == segments.len() {
			rest.len()
		} else {
			arity.min(rest.len())
		};
		let (own, tail) = rest.split_at(take);
		out.push((base, own));
		rest = tail;
	}
	out
}

fn chain<'s>(enclosing: &'s [String], name: &'s str) -> Vec<&'s str> {
	enclosing
		.iter()
		.map(String::as_str)
		.chain(std::iter::once(name))
		.collect()
}

/// Render a type reference as C# source.
pub fn type_sig_name(sig: &TypeSig) -> String {
	match sig {
		TypeSig::Named {
			namespace,
			enclosing,
			name,
			generic_args,
		} => {
			if generic_args.is_empty()
				&& let Some(full) = sig.full_name()
				&& let Some(alias) = type_alias(&full)
			{
				return alias.to_string();
			}
			let mut parts = Vec::new();
			if !namespace.is_empty() {
				parts.push(namespace.clone());
			}
			for (base, args) in distribute(&chain(enclosing, name), generic_args) {
				if args.is_empty() {
					parts.push(base.to_string());
				} else {
					let args: Vec<String> = args.iter().map(type_sig_name).collect();
					parts.push(format!("{base}<{}>", args.join(",")));
				}
			}
			parts.join(".")
		}
		TypeSig::GenericParam { name, .. } => name.clone(),
		TypeSig::Array { element, rank } => {
			let commas = ",".repeat(rank.saturating_sub(1) as usize);
			format!("{}[{commas}]", type_sig_name(element))
		}
		TypeSig::Pointer { element } => format!("{}*", type_sig_name(element)),
		TypeSig::ByRef { element } => type_sig_name(element),
	}
}

/// Render a type definition's name: `Outer<T>.Inner`, optionally namespace-qualified.
pub fn type_name(ty: &TypeDef, options: NameOptions) -> String {
	let mut parts = Vec::new();
	if options.contains(NameOptions::QUALIFIED) && !ty.namespace.is_empty() {
		parts.push(ty.namespace.clone());
	}
	for (base, params) in distribute(&chain(&ty.enclosing, &ty.name), &ty.generic_params) {
		if options.contains(NameOptions::BRACES) && !params.is_empty() {
			parts.push(format!("{base}<{}>", generic_list(params)));
		} else {
			parts.push(base.to_string());
		}
	}
	parts.join(".")
}

/// Generic parameters declared by the innermost type itself.
pub fn own_generic_params(ty: &TypeDef) -> &[GenericParam] {
	distribute(&chain(&ty.enclosing, &ty.name), &ty.generic_params)
		.last()
		.map(|(_, params)| *params)
		.unwrap_or_default()
}

fn generic_list(params: &[GenericParam]) -> String {
	params
		.iter()
		.map(|param| param.name.as_str())
		.collect::<Vec<_>>()
		.join(",")
}

/// Render one parameter.
pub fn param_display(param: &ParamDef, receiver: bool, options: NameOptions) -> String {
	let mut out = String::new();
	let with_names = options.contains(NameOptions::PARAM_NAMES);
	if receiver && with_names {
		out.push_str("this ");
	}
	if let Some(modifier) = param.modifier() {
		out.push_str(modifier.keyword());
		out.push(' ');
	}
	if param.is_params && with_names {
		out.push_str("params ");
	}
	out.push_str(&type_sig_name(&param.param_type));
	if with_names {
		out.push(' ');
		out.push_str(&param.name);
		if let Some(default) = &param.default_value {
			out.push_str(" = ");
			out.push_str(default);
		}
	}
	out
}

fn param_list(params: &[ParamDef], extension: bool, options: NameOptions) -> String {
	params
		.iter()
		.enumerate()
		.map(|(index, param)| param_display(param, extension && index == 0, options))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Name of a method without qualification or signature: `Run<T>`, `Widget`, `operator +`.
fn method_base_name(ty: &TypeDef, method: &MethodDef, options: NameOptions) -> String {
	if method.is_constructor() {
		return split_arity(&ty.name).0.to_string();
	}
	if method.is_conversion()
		&& let Some(keyword) = operator_name(&method.name)
	{
		return format!("{keyword} {}", type_sig_name(&method.return_type));
	}
	if method.is_operator()
		&& let Some(source) = operator_name(&method.name)
	{
		return source.to_string();
	}
	if options.contains(NameOptions::BRACES) && !method.generic_params.is_empty() {
		format!("{}<{}>", method.name, generic_list(&method.generic_params))
	} else {
		method.name.clone()
	}
}

fn property_base_name(property: &PropertyDef, options: NameOptions) -> String {
	if property.is_indexer() {
		format!("this[{}]", param_list(&property.parameters, false, options))
	} else {
		property.name.clone()
	}
}

/// Human-readable name of an entity.
pub fn display_name(entity: Entity<'_>, options: NameOptions) -> String {
	let (declaring, base, return_type) = match entity {
		Entity::Namespace(name) if name.is_empty() => return GLOBAL_NAMESPACE.to_string(),
		Entity::Namespace(name) => return name.to_string(),
		Entity::Type(ty) => return type_name(ty, options),
		Entity::Field(ty, field) => (ty, field.name.clone(), Some(&field.field_type)),
		Entity::Event(ty, event) => (ty, event.name.clone(), Some(&event.event_type)),
		Entity::Property(ty, property) => (
			ty,
			property_base_name(property, options),
			Some(&property.property_type),
		),
		Entity::Method(ty, method) => {
			let mut base = method_base_name(ty, method, options);
			if options.contains(NameOptions::SIGNATURE) {
				base.push('(');
				base.push_str(&param_list(&method.parameters, method.is_extension(), options));
				base.push(')');
			}
			let return_type = (!method.is_constructor() && !method.is_conversion()).then_some(&method.return_type);
			(ty, base, return_type)
		}
	};

	let mut out = String::new();
	if options.contains(NameOptions::RETURN_TYPE)
		&& let Some(return_type) = return_type
	{
		out.push_str(&type_sig_name(return_type));
		out.push(' ');
	}
	if options.contains(NameOptions::QUALIFIED) {
		out.push_str(&type_name(declaring, options));
		out.push('.');
	}
	out.push_str(&base);
	out
}

/// Section heading, which is also the anchor's source text: `Widget class`, `Run(int) method`.
pub fn title(entity: Entity<'_>) -> String {
	format!(
		"{} {}",
		display_name(entity, NameOptions::SIGNATURE | NameOptions::BRACES),
		entity.kind_word()
	)
}

/// Signature-bearing lookup key: kind prefix plus the qualified display signature.
pub fn signature_key(entity: Entity<'_>) -> String {
	format!(
		"{}:{}",
		entity.key_prefix(),
		display_name(
			entity,
			NameOptions::QUALIFIED | NameOptions::SIGNATURE | NameOptions::BRACES
		)
	)
}

/// Documentation ID, as used by `<member name>` and `cref`.
pub fn xml_key(entity: Entity<'_>) -> String {
	let prefix = entity.key_prefix();
	match entity {
		Entity::Namespace(name) => format!("{prefix}:{name}"),
		Entity::Type(ty) => format!("{prefix}:{}", ty.full_name()),
		Entity::Field(ty, field) => format!("{prefix}:{}.{}", ty.full_name(), field.name),
		Entity::Event(ty, event) => format!("{prefix}:{}.{}", ty.full_name(), event.name),
		Entity::Property(ty, property) => format!(
			"{prefix}:{}.{}{}",
			ty.full_name(),
			property.name,
			xml_params(&property.parameters)
		),
		Entity::Method(ty, method) => {
			let mut key = format!("{prefix}:{}.{}", ty.full_name(), method.name.replace('.', "#"));
			if !method.generic_params.is_empty() {
				key.push_str(&format!("``{}", method.generic_params.len()));
			}
			key.push_str(&xml_params(&method.parameters));
			if method.is_conversion() {
				key.push('~');
				key.push_str(&xml_type(&method.return_type));
			}
			key
		}
	}
}

fn xml_params(params: &[ParamDef]) -> String {
	if params.is_empty() {
		return String::new();
	}
	let types: Vec<String> = params.iter().map(|param| xml_type(&param.param_type)).collect();
	format!("({})", types.join(","))
}

/// Documentation-ID form of a type reference.
pub fn xml_type(sig: &TypeSig) -> String {
	match sig {
		TypeSig::Named {
			namespace,
			enclosing,
			name,
			generic_args,
		} => {
			let mut parts = Vec::new();
			if !namespace.is_empty() {
				parts.push(namespace.clone());
			}
			let segments = chain(enclosing, name);
			if generic_args.is_empty() {
				parts.extend(segments.iter().map(|segment| segment.to_string()));
			} else {
				for (base, args) in distribute(&segments, generic_args) {
					if args.is_empty() {
						parts.push(base.to_string());
					} else {
						let args: Vec<String> = args.iter().map(xml_type).collect();
						parts.push(format!("{base}{{{}}}", args.join(",")));
					}
				}
			}
			parts.join(".")
		}
		TypeSig::GenericParam {
			position,
			owner: GenericOwner::Type,
			..
		} => format!("`{position}"),
		TypeSig::GenericParam {
			position,
			owner: GenericOwner::Method,
			..
		} => format!("``{position}"),
		TypeSig::Array { element, rank } if *rank <= 1 => format!("{}[]", xml_type(element)),
		TypeSig::Array { element, rank } => {
			let bounds = vec!["0:"; *rank as usize].join(",");
			format!("{}[{bounds}]", xml_type(element))
		}
		TypeSig::Pointer { element } => format!("{}*", xml_type(element)),
		TypeSig::ByRef { element } => format!("{}@", xml_type(element)),
	}
}
