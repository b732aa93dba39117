use super::{
	MEMBER_LEVEL, push_declaration, push_exceptions, push_labelled, push_params, push_summary,
	push_trailing, push_type_params,
};
use crate::comments::DocRecord;
use crate::metadata::{MethodDef, PropertyDef};
use crate::render::entity::Entity;
use crate::render::state::RenderState;
use crate::render::syntax::declaration;

/// Render one member section.
pub fn render_member(state: &mut RenderState<'_>, entity: Entity<'_>) {
	state.push_entity_heading(MEMBER_LEVEL, entity);

	let record = state.record(entity);
	push_summary(state, record);
	push_declaration(state, &declaration(entity));

	match entity {
		Entity::Method(_, method) => render_method_details(state, method, record),
		Entity::Property(_, property) => render_property_details(state, property, record),
		Entity::Field(..) | Entity::Event(..) | Entity::Namespace(_) | Entity::Type(_) => {}
	}

	push_exceptions(state, record);
	push_trailing(state, record);
}

fn render_method_details(state: &mut RenderState<'_>, method: &MethodDef, record: Option<&DocRecord>) {
	push_type_params(state, &method.generic_params, record);
	push_params(state, &method.parameters, record);
	if !method.is_constructor() {
		let returns = state.prose(record.and_then(|record| record.returns.as_ref()));
		push_labelled(state, "Returns", returns);
	}
}

fn render_property_details(
	state: &mut RenderState<'_>,
	property: &PropertyDef,
	record: Option<&DocRecord>,
) {
	if property.is_indexer() {
		push_params(state, &property.parameters, record);
	}
	let value = state.prose(record.and_then(|record| record.value.as_ref()));
	push_labelled(state, "Value", value);
}
