//! Source-like declarations reconstructed from metadata.

use super::entity::Entity;
use super::names::{NameOptions, display_name, own_generic_params, param_display, type_name, type_sig_name};
use crate::metadata::{
	AccessorDef, FieldDef, GenericParam, MethodDef, MethodModifiers, PropertyDef, TypeDef, TypeKind,
	TypeSig, Variance, Visibility,
};

/// Base types implied by the declaration keyword.
const IMPLICIT_BASES: &[&str] = &[
	"System.Object",
	"System.ValueType",
	"System.Enum",
	"System.MulticastDelegate",
];

const INDENT: &str = "    ";

/// Declaration of any entity, ready to be fenced.
pub fn declaration(entity: Entity<'_>) -> String {
	match entity {
		Entity::Namespace(name) => format!("namespace {name}"),
		Entity::Type(ty) => type_declaration(ty),
		Entity::Field(ty, field) => field_declaration(ty, field),
		Entity::Property(ty, property) => property_declaration(ty, property, entity),
		Entity::Event(ty, event) => {
			let modifiers = event
				.primary_accessor()
				.map(|accessor| member_modifiers(ty, accessor.visibility, &accessor.modifiers))
				.unwrap_or_default();
			format!(
				"{modifiers}event {}",
				display_name(entity, NameOptions::RETURN_TYPE)
			)
		}
		Entity::Method(ty, method) => method_declaration(ty, method, entity),
	}
}

/// `namespace Ns { ... }` wrapper around a type's header.
pub fn type_declaration(ty: &TypeDef) -> String {
	let header = type_header(ty);
	if ty.namespace.is_empty() {
		return header;
	}
	let body: Vec<String> = header.lines().map(|line| format!("{INDENT}{line}")).collect();
	format!("namespace {}\n{{\n{}\n}}", ty.namespace, body.join("\n"))
}

fn type_header(ty: &TypeDef) -> String {
	let kind = ty.kind();
	let mut out = String::new();
	out.push_str(ty.visibility.keyword());
	out.push(' ');
	if kind == TypeKind::Class {
		if ty.is_static() {
			out.push_str("static ");
		} else if ty.is_abstract {
			out.push_str("abstract ");
		} else if ty.is_sealed {
			out.push_str("sealed ");
		}
	}
	out.push_str(kind.keyword());
	out.push(' ');

	let own = own_generic_params(ty);
	if kind == TypeKind::Delegate
		&& let Some(invoke) = ty.invoke_method()
	{
		out.push_str(&type_sig_name(&invoke.return_type));
		out.push(' ');
		out.push_str(&type_name(ty, NameOptions::empty()));
		out.push_str(&generic_declaration(own));
		out.push('(');
		out.push_str(&parameters(invoke, false));
		out.push(')');
		out.push_str(&where_clauses(own));
		return out;
	}

	out.push_str(&type_name(ty, NameOptions::empty()));
	out.push_str(&generic_declaration(own));

	let mut bases: Vec<String> = Vec::new();
	if kind == TypeKind::Enum {
		if let Some(underlying) = ty.enum_underlying_type()
			&& underlying.full_name().as_deref() != Some("System.Int32")
		{
			bases.push(type_sig_name(underlying));
		}
	} else if let Some(base) = &ty.base_type
		&& !is_implicit_base(base)
	{
		bases.push(type_sig_name(base));
	}
	bases.extend(ty.interfaces.iter().map(type_sig_name));
	if !bases.is_empty() {
		out.push_str(" : ");
		out.push_str(&bases.join(", "));
	}
	out.push_str(&where_clauses(own));
	out
}

fn is_implicit_base(base: &TypeSig) -> bool {
	base.full_name()
		.is_some_and(|name| IMPLICIT_BASES.contains(&name.as_str()))
}

/// `<in T, out U>`; empty when there are no parameters.
fn generic_declaration(params: &[GenericParam]) -> String {
	if params.is_empty() {
		return String::new();
	}
	let rendered: Vec<String> = params
		.iter()
		.map(|param| match param.variance {
			Variance::None => param.name.clone(),
			Variance::Covariant => format!("out {}", param.name),
			Variance::Contravariant => format!("in {}", param.name),
		})
		.collect();
	format!("<{}>", rendered.join(", "))
}

/// One indented `where` line per constrained parameter.
fn where_clauses(params: &[GenericParam]) -> String {
	let mut out = String::new();
	for param in params.iter().filter(|param| param.is_constrained()) {
		let mut constraints: Vec<String> = Vec::new();
		if param.reference_type {
			constraints.push("class".to_string());
		}
		if param.value_type {
			constraints.push("struct".to_string());
		}
		constraints.extend(
			param
				.constraints
				.iter()
				.filter(|constraint| !(param.value_type && constraint.full_name().as_deref() == Some("System.ValueType")))
				.map(type_sig_name),
		);
		if param.default_constructor && !param.value_type {
			constraints.push("new()".to_string());
		}
		out.push_str(&format!("\n{INDENT}where {} : {}", param.name, constraints.join(", ")));
	}
	out
}

fn parameters(method: &MethodDef, extension: bool) -> String {
	method
		.parameters
		.iter()
		.enumerate()
		.map(|(index, param)| {
			param_display(param, extension && index == 0, NameOptions::PARAM_NAMES)
		})
		.collect::<Vec<_>>()
		.join(", ")
}

/// Accessibility and modifier keywords, trailing space included.
fn member_modifiers(ty: &TypeDef, visibility: Visibility, modifiers: &MethodModifiers) -> String {
	if ty.kind() == TypeKind::Interface {
		return if modifiers.is_static {
			"static ".to_string()
		} else {
			String::new()
		};
	}
	let mut words = vec![visibility.keyword()];
	if modifiers.is_static {
		words.push("static");
	}
	if modifiers.is_abstract {
		words.push("abstract");
	} else if modifiers.is_virtual && !modifiers.is_new_slot {
		if modifiers.is_final {
			words.push("sealed");
		}
		words.push("override");
	} else if modifiers.is_virtual && !modifiers.is_final {
		words.push("virtual");
	}
	format!("{} ", words.join(" "))
}

fn field_declaration(ty: &TypeDef, field: &FieldDef) -> String {
	if ty.kind() == TypeKind::Enum {
		return match &field.constant {
			Some(value) => format!("{} = {value}", field.name),
			None => field.name.clone(),
		};
	}
	let mut out = format!("{} ", field.visibility.keyword());
	if field.is_literal {
		out.push_str("const ");
	} else {
		if field.is_static {
			out.push_str("static ");
		}
		if field.is_init_only {
			out.push_str("readonly ");
		}
	}
	out.push_str(&type_sig_name(&field.field_type));
	out.push(' ');
	out.push_str(&field.name);
	if field.is_literal
		&& let Some(value) = &field.constant
	{
		out.push_str(" = ");
		out.push_str(value);
	}
	out
}

fn property_declaration(ty: &TypeDef, property: &PropertyDef, entity: Entity<'_>) -> String {
	let Some(primary) = property.primary_accessor() else {
		return display_name(entity, NameOptions::RETURN_TYPE | NameOptions::PARAM_NAMES);
	};
	let mut out = member_modifiers(ty, primary.visibility, &primary.modifiers);
	out.push_str(&display_name(
		entity,
		NameOptions::RETURN_TYPE | NameOptions::PARAM_NAMES,
	));

	let mut accessors = Vec::new();
	if let Some(getter) = &property.getter {
		accessors.extend(accessor(ty, getter, primary, "get"));
	}
	if let Some(setter) = &property.setter {
		accessors.extend(accessor(ty, setter, primary, if setter.is_init { "init" } else { "set" }));
	}
	out.push_str(&format!(" {{ {}; }}", accessors.join("; ")));
	out
}

/// An accessor keyword, prefixed with its accessibility when it differs from the property's.
fn accessor(ty: &TypeDef, accessor: &AccessorDef, primary: &AccessorDef, keyword: &str) -> Option<String> {
	if !accessor.visibility.is_visible() {
		return None;
	}
	if accessor.visibility == primary.visibility || ty.kind() == TypeKind::Interface {
		Some(keyword.to_string())
	} else {
		Some(format!("{} {keyword}", accessor.visibility.keyword()))
	}
}

fn method_declaration(ty: &TypeDef, method: &MethodDef, entity: Entity<'_>) -> String {
	let mut out = member_modifiers(ty, method.visibility, &method.modifiers);
	out.push_str(&display_name(
		entity,
		NameOptions::SIGNATURE | NameOptions::RETURN_TYPE | NameOptions::BRACES | NameOptions::PARAM_NAMES,
	));
	out.push_str(&where_clauses(&method.generic_params));
	out
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::metadata::parse_assembly;

	fn assembly(types: &str) -> crate::metadata::Assembly {
		parse_assembly(&format!(r#"{{"format_version": 1, "name": "Demo", "types": [{types}]}}"#)).unwrap()
	}

	const INT: &str = r#"{"kind": "named", "namespace": "System", "name": "Int32"}"#;
	const VOID: &str = r#"{"kind": "named", "namespace": "System", "name": "Void"}"#;

	#[test]
	fn class_headers() {
		let asm = assembly(&format!(
			r#"{{"namespace": "Demo", "name": "Cache`1", "visibility": "public", "is_sealed": true,
				"base_type": {{"kind": "named", "namespace": "System", "name": "Object"}},
				"interfaces": [{{"kind": "named", "namespace": "System", "name": "IDisposable"}}],
				"generic_params": [{{"name": "T", "reference_type": true, "default_constructor": true}}],
				"fields": [{{"name": "x", "field_type": {INT}, "visibility": "private"}}]}}"#
		));
		assert_eq!(
			type_declaration(&asm.types[0]),
			"namespace Demo\n{\n    public sealed class Cache<T> : System.IDisposable\n        where T : class, new()\n}"
		);
	}

	#[test]
	fn enum_and_delegate_headers() {
		let asm = assembly(&format!(
			r#"{{"name": "Color", "visibility": "public",
				"base_type": {{"kind": "named", "namespace": "System", "name": "Enum"}},
				"fields": [{{"name": "value__", "field_type": {{"kind": "named", "namespace": "System", "name": "Byte"}}, "visibility": "public", "special_name": true}},
					{{"name": "Red", "field_type": {INT}, "visibility": "public", "is_literal": true, "is_static": true, "constant": "1"}}]}},
			{{"namespace": "Demo", "name": "Predicate`1", "visibility": "public",
				"base_type": {{"kind": "named", "namespace": "System", "name": "MulticastDelegate"}},
				"generic_params": [{{"name": "T", "variance": "contravariant"}}],
				"methods": [{{"name": "Invoke", "visibility": "public", "modifiers": {{"is_virtual": true, "is_new_slot": true}},
					"parameters": [{{"name": "obj", "param_type": {{"kind": "generic_param", "name": "T", "position": 0, "owner": "type"}}}}],
					"return_type": {{"kind": "named", "namespace": "System", "name": "Boolean"}}}}]}}"#
		));
		assert_eq!(type_declaration(&asm.types[0]), "public enum Color : byte");
		let color = &asm.types[0];
		assert_eq!(declaration(Entity::Field(color, &color.fields[1])), "Red = 1");
		assert_eq!(
			type_declaration(&asm.types[1]),
			"namespace Demo\n{\n    public delegate bool Predicate<in T>(T obj)\n}"
		);
	}

	#[test]
	fn member_declarations() {
		let asm = assembly(&format!(
			r#"{{"namespace": "Demo", "name": "Widget", "visibility": "public",
				"fields": [{{"name": "Empty", "field_type": {{"kind": "named", "namespace": "System", "name": "String"}}, "visibility": "public", "is_static": true, "is_init_only": true}}],
				"properties": [{{"name": "Size", "property_type": {INT},
					"getter": {{"visibility": "public", "modifiers": {{"is_virtual": true, "is_new_slot": true}}}},
					"setter": {{"visibility": "protected", "modifiers": {{"is_virtual": true, "is_new_slot": true}}}}}}],
				"events": [{{"name": "Changed", "event_type": {{"kind": "named", "namespace": "System", "name": "EventHandler"}},
					"adder": {{"visibility": "public"}}, "remover": {{"visibility": "public"}}}}],
				"methods": [
					{{"name": "ToString", "visibility": "public", "modifiers": {{"is_virtual": true}},
						"return_type": {{"kind": "named", "namespace": "System", "name": "String"}}}},
					{{"name": "Fill", "visibility": "public", "modifiers": {{"is_static": true}},
						"generic_params": [{{"name": "T", "value_type": true, "default_constructor": true}}],
						"parameters": [{{"name": "count", "param_type": {INT}, "default_value": "5"}},
							{{"name": "items", "param_type": {{"kind": "array", "element": {{"kind": "generic_param", "name": "T", "position": 0, "owner": "method"}}}}, "is_params": true}}],
						"return_type": {VOID}}}
				]}}"#
		));
		let ty = &asm.types[0];
		assert_eq!(
			declaration(Entity::Field(ty, &ty.fields[0])),
			"public static readonly string Empty"
		);
		assert_eq!(
			declaration(Entity::Property(ty, &ty.properties[0])),
			"public virtual int Size { get; protected set; }"
		);
		assert_eq!(
			declaration(Entity::Event(ty, &ty.events[0])),
			"public event System.EventHandler Changed"
		);
		assert_eq!(
			declaration(Entity::Method(ty, &ty.methods[0])),
			"public override string ToString()"
		);
		assert_eq!(
			declaration(Entity::Method(ty, &ty.methods[1])),
			"public static void Fill<T>(int count = 5, params T[] items)\n    where T : struct"
		);
	}

	#[test]
	fn widest_accessor_carries_the_property_visibility() {
		let asm = assembly(&format!(
			r#"{{"namespace": "Demo", "name": "Widget", "visibility": "public",
				"properties": [{{"name": "X", "property_type": {INT},
					"getter": {{"visibility": "protected"}}, "setter": {{"visibility": "public"}}}}],
				"events": [{{"name": "Moved", "event_type": {{"kind": "named", "namespace": "System", "name": "EventHandler"}},
					"adder": {{"visibility": "protected"}}, "remover": {{"visibility": "public", "modifiers": {{"is_static": true}}}}}}]}}"#
		));
		let ty = &asm.types[0];
		assert_eq!(
			declaration(Entity::Property(ty, &ty.properties[0])),
			"public int X { protected get; set; }"
		);
		assert_eq!(
			declaration(Entity::Event(ty, &ty.events[0])),
			"public static event System.EventHandler Moved"
		);
	}
}
