/// Assembly header, metadata table and namespace index.
pub mod assembly;
/// Member sections.
pub mod members;
/// Namespace sections and type indices.
pub mod namespace;
/// Type sections and member indices.
pub mod types;

use super::markdown::fenced;
use super::state::RenderState;
use super::utils::{bullet_list, code_span, label, table};
use crate::comments::{DocRecord, Node};
use crate::metadata::{GenericParam, ParamDef};

/// Heading offsets below the assembly heading.
pub(crate) const NAMESPACE_LEVEL: usize = 1;
pub(crate) const TYPE_LEVEL: usize = 2;
pub(crate) const MEMBER_LEVEL: usize = 3;

/// Walk the outline in emission order and render every section.
pub fn render_document(state: &mut RenderState<'_>) {
	assembly::render_assembly(state);

	let outline = state.outline;
	for ns in &outline.namespaces {
		namespace::render_namespace(state, ns);
		for ty in &ns.types {
			types::render_type(state, ty);
			for member in ty.members() {
				members::render_member(state, member);
			}
		}
	}
}

/// Push the summary of a record, if any.
pub(crate) fn push_summary(state: &mut RenderState<'_>, record: Option<&DocRecord>) {
	if let Some(summary) = state.prose(record.and_then(|record| record.summary.as_ref())) {
		state.push(summary);
	}
}

/// Push a reconstructed declaration as a fenced block.
pub(crate) fn push_declaration(state: &mut RenderState<'_>, declaration: &str) {
	state.push(fenced(declaration));
}

/// Push a labelled block when there is a body.
pub(crate) fn push_labelled(state: &mut RenderState<'_>, name: &str, body: Option<String>) {
	if let Some(body) = body {
		state.push(format!("{}\n\n{body}", label(name)));
	}
}

pub(crate) fn push_type_params(
	state: &mut RenderState<'_>,
	params: &[GenericParam],
	record: Option<&DocRecord>,
) {
	let rows: Vec<(String, String)> = params
		.iter()
		.map(|param| {
			let description = state.inline(record.and_then(|record| record.type_param(&param.name)));
			(code_span(&param.name), description)
		})
		.collect();
	state.push(table(["Type parameter", "Description"], &rows));
}

pub(crate) fn push_params(state: &mut RenderState<'_>, params: &[ParamDef], record: Option<&DocRecord>) {
	let rows: Vec<(String, String)> = params
		.iter()
		.map(|param| {
			let description = state.inline(record.and_then(|record| record.param(&param.name)));
			(code_span(&param.name), description)
		})
		.collect();
	state.push(table(["Parameter", "Description"], &rows));
}

/// Exception types a member documents as thrown.
pub(crate) fn push_exceptions(state: &mut RenderState<'_>, record: Option<&DocRecord>) {
	let Some(record) = record else {
		return;
	};
	let rows: Vec<(String, String)> = record
		.exceptions
		.iter()
		.map(|(cref, description)| {
			let target = Node::Reference {
				target: cref.clone(),
				children: Vec::new(),
			};
			(state.inline_node(&target), state.inline(Some(description)))
		})
		.collect();
	state.push(table(["Exception", "Description"], &rows));
}

/// Remarks, example and see-also sections, in that order.
pub(crate) fn push_trailing(state: &mut RenderState<'_>, record: Option<&DocRecord>) {
	let Some(record) = record else {
		return;
	};
	let remarks = state.prose(record.remarks.as_ref());
	push_labelled(state, "Remarks", remarks);
	let example = state.prose(record.example.as_ref());
	push_labelled(state, "Example", example);

	if let Some(see_also) = &record.see_also {
		let entries: Vec<String> = see_also
			.nodes
			.iter()
			.map(|node| state.inline_node(node))
			.filter(|entry| !entry.is_empty())
			.collect();
		if !entries.is_empty() {
			push_labelled(state, "See also", Some(bullet_list(&entries)));
		}
	}
}
