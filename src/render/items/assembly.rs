use crate::render::core::Renderer;
use crate::render::entity::Entity;
use crate::render::markdown::escape_html;
use crate::render::state::RenderState;
use crate::render::utils::table;

/// Assembly attributes listed in the metadata table, by row label.
const METADATA_ATTRIBUTES: &[(&str, &str)] = &[
	("Title", "System.Reflection.AssemblyTitleAttribute"),
	("Description", "System.Reflection.AssemblyDescriptionAttribute"),
	("Configuration", "System.Reflection.AssemblyConfigurationAttribute"),
	("Company", "System.Reflection.AssemblyCompanyAttribute"),
	("Product", "System.Reflection.AssemblyProductAttribute"),
	("Copyright", "System.Reflection.AssemblyCopyrightAttribute"),
	("Trademark", "System.Reflection.AssemblyTrademarkAttribute"),
	("FileVersion", "System.Reflection.AssemblyFileVersionAttribute"),
	(
		"InformationalVersion",
		"System.Reflection.AssemblyInformationalVersionAttribute",
	),
	("TargetFramework", "System.Runtime.Versioning.TargetFrameworkAttribute"),
];

/// Render the document head: title, metadata table and namespace index.
pub fn render_assembly(state: &mut RenderState<'_>) {
	let assembly = state.assembly;
	state.push_heading(0, &Renderer::assembly_title(assembly));

	let mut rows: Vec<(String, String)> = Vec::new();
	if !assembly.version.is_empty() {
		rows.push(("Version".to_string(), escape_html(&assembly.version)));
	}
	for (name, attribute) in METADATA_ATTRIBUTES {
		if let Some(value) = assembly.attribute_value(attribute)
			&& !value.trim().is_empty()
		{
			rows.push((name.to_string(), escape_html(value)));
		}
	}
	state.push(table(["Name", "Value"], &rows));

	let outline = state.outline;
	let index: Vec<(String, String)> = outline
		.namespaces
		.iter()
		.map(|namespace| {
			let types: Vec<String> = namespace
				.types
				.iter()
				.map(|ty| state.link(Entity::Type(ty.def)))
				.collect();
			(state.link(Entity::Namespace(namespace.name)), types.join(", "))
		})
		.collect();
	state.push(table(["Namespace", "Types"], &index));
}
