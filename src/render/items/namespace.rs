use super::{NAMESPACE_LEVEL, push_summary};
use crate::render::entity::Entity;
use crate::render::outline::NamespaceOutline;
use crate::render::state::RenderState;
use crate::render::utils::table;

/// Render a namespace heading followed by its type index.
pub fn render_namespace(state: &mut RenderState<'_>, namespace: &NamespaceOutline<'_>) {
	let entity = Entity::Namespace(namespace.name);
	state.push_entity_heading(NAMESPACE_LEVEL, entity);

	let record = state.record(entity);
	push_summary(state, record);

	let rows: Vec<(String, String)> = namespace
		.types
		.iter()
		.map(|ty| {
			let entity = Entity::Type(ty.def);
			(state.link(entity), state.summary_of(entity))
		})
		.collect();
	state.push(table(["Type", "Summary"], &rows));
}
