use super::{
	TYPE_LEVEL, push_declaration, push_labelled, push_params, push_summary, push_trailing,
	push_type_params,
};
use crate::metadata::TypeKind;
use crate::render::entity::Entity;
use crate::render::names::own_generic_params;
use crate::render::outline::TypeOutline;
use crate::render::state::RenderState;
use crate::render::syntax::type_declaration;
use crate::render::utils::table;

/// Render a type section: prose, declaration and one index table per member group.
pub fn render_type(state: &mut RenderState<'_>, ty: &TypeOutline<'_>) {
	let entity = Entity::Type(ty.def);
	state.push_entity_heading(TYPE_LEVEL, entity);

	let record = state.record(entity);
	push_summary(state, record);
	push_declaration(state, &type_declaration(ty.def));
	push_type_params(state, own_generic_params(ty.def), record);

	if ty.def.kind() == TypeKind::Delegate
		&& let Some(invoke) = ty.def.invoke_method()
	{
		push_params(state, &invoke.parameters, record);
		let returns = state.prose(record.and_then(|record| record.returns.as_ref()));
		push_labelled(state, "Returns", returns);
	}

	push_trailing(state, record);

	let def = ty.def;
	push_member_index(state, "Field", ty.fields.iter().map(|f| Entity::Field(def, *f)));
	push_member_index(state, "Property", ty.properties.iter().map(|p| Entity::Property(def, *p)));
	push_member_index(state, "Event", ty.events.iter().map(|e| Entity::Event(def, *e)));
	push_member_index(state, "Method", ty.methods.iter().map(|m| Entity::Method(def, *m)));
}

fn push_member_index<'e>(state: &mut RenderState<'_>, group: &str, members: impl Iterator<Item = Entity<'e>>) {
	let rows: Vec<(String, String)> = members
		.map(|entity| (state.link(entity), state.summary_of(entity)))
		.collect();
	state.push(table([group, "Summary"], &rows));
}
