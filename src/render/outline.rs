//! The visible entity tree in emission order.
//!
//! Anchor assignment and document writing both walk an [`Outline`]; building the order
//! once keeps the two passes in lockstep.

use std::collections::{BTreeMap, HashMap};

use super::entity::Entity;
use super::names::{NameOptions, display_name, type_name};
use crate::metadata::{Assembly, EventDef, FieldDef, MethodDef, PropertyDef, TypeDef, TypeKind};

/// A visible namespace and its visible types.
#[derive(Debug)]
pub struct NamespaceOutline<'a> {
	/// Namespace name; empty for the global namespace.
	pub name: &'a str,
	/// Types ordered by display name.
	pub types: Vec<TypeOutline<'a>>,
}

/// A visible type and its visible members, each group ordered by display name.
#[derive(Debug)]
pub struct TypeOutline<'a> {
	/// The type.
	pub def: &'a TypeDef,
	/// Fields.
	pub fields: Vec<&'a FieldDef>,
	/// Properties.
	pub properties: Vec<&'a PropertyDef>,
	/// Events.
	pub events: Vec<&'a EventDef>,
	/// Methods, constructors first.
	pub methods: Vec<&'a MethodDef>,
}

impl<'a> TypeOutline<'a> {
	fn new(def: &'a TypeDef) -> Self {
		if def.kind() == TypeKind::Delegate {
			return Self {
				def,
				fields: Vec::new(),
				properties: Vec::new(),
				events: Vec::new(),
				methods: Vec::new(),
			};
		}

		let mut fields: Vec<&FieldDef> = def.fields.iter().filter(|f| f.is_documented()).collect();
		let mut properties: Vec<&PropertyDef> =
			def.properties.iter().filter(|p| p.is_documented()).collect();
		let mut events: Vec<&EventDef> = def.events.iter().filter(|e| e.is_documented()).collect();
		let mut methods: Vec<&MethodDef> = def.methods.iter().filter(|m| m.is_documented()).collect();

		fields.sort_by_cached_key(|f| sort_key(Entity::Field(def, f)));
		properties.sort_by_cached_key(|p| sort_key(Entity::Property(def, p)));
		events.sort_by_cached_key(|e| sort_key(Entity::Event(def, e)));
		methods.sort_by_cached_key(|m| (!m.is_constructor(), sort_key(Entity::Method(def, m))));

		Self {
			def,
			fields,
			properties,
			events,
			methods,
		}
	}

	/// Member entities in emission order.
	pub fn members(&self) -> impl Iterator<Item = Entity<'a>> + '_ {
		let def = self.def;
		self.fields
			.iter()
			.map(move |f| Entity::Field(def, *f))
			.chain(self.properties.iter().map(move |p| Entity::Property(def, *p)))
			.chain(self.events.iter().map(move |e| Entity::Event(def, *e)))
			.chain(self.methods.iter().map(move |m| Entity::Method(def, *m)))
	}

	/// Whether no member is listed.
	pub fn has_members(&self) -> bool {
		!(self.fields.is_empty() && self.properties.is_empty() && self.events.is_empty() && self.methods.is_empty())
	}
}

fn sort_key(entity: Entity<'_>) -> String {
	display_name(entity, NameOptions::SIGNATURE | NameOptions::BRACES)
}

/// Every visible entity of an assembly, grouped and ordered.
#[derive(Debug)]
pub struct Outline<'a> {
	/// Namespaces in lexicographic order.
	pub namespaces: Vec<NamespaceOutline<'a>>,
}

impl<'a> Outline<'a> {
	/// Collect the visible entities of an assembly.
	pub fn new(assembly: &'a Assembly) -> Self {
		let by_name: HashMap<String, &TypeDef> =
			assembly.types.iter().map(|ty| (ty.full_name(), ty)).collect();

		let mut grouped: BTreeMap<&str, Vec<&TypeDef>> = BTreeMap::new();
		for ty in &assembly.types {
			if is_type_visible(ty, &by_name) {
				grouped.entry(ty.namespace.as_str()).or_default().push(ty);
			}
		}

		let namespaces = grouped
			.into_iter()
			.map(|(name, mut types)| {
				types.sort_by_cached_key(|ty| type_name(ty, NameOptions::BRACES));
				NamespaceOutline {
					name,
					types: types.into_iter().map(TypeOutline::new).collect(),
				}
			})
			.collect();

		Self { namespaces }
	}

	/// Every entity in emission order: each namespace, then each of its types followed by
	/// that type's members.
	pub fn entities(&self) -> impl Iterator<Item = Entity<'a>> + '_ {
		self.namespaces.iter().flat_map(|namespace| {
			std::iter::once(Entity::Namespace(namespace.name)).chain(
				namespace
					.types
					.iter()
					.flat_map(|ty| std::iter::once(Entity::Type(ty.def)).chain(ty.members())),
			)
		})
	}
}

/// A type is visible when it and every enclosing type are visible and none is hidden.
fn is_type_visible(ty: &TypeDef, by_name: &HashMap<String, &TypeDef>) -> bool {
	if !ty.visibility.is_visible() || ty.is_hidden() {
		return false;
	}
	match ty.enclosing_full_name() {
		Some(outer) => by_name
			.get(&outer)
			.is_some_and(|outer| is_type_visible(outer, by_name)),
		None => true,
	}
}
