/// Markdown heading at `level`, clamped to the six levels Markdown has. Angle brackets
/// are backslash-escaped so generic arguments are not read as HTML tags.
pub fn heading(level: usize, title: &str) -> String {
	let title = title.replace('<', "\\<").replace('>', "\\>");
	format!("{} {title}", "#".repeat(level.clamp(1, 6)))
}

/// Inline code span.
pub fn code_span(text: &str) -> String {
	format!("`{text}`")
}

/// Make rendered text safe for a single table cell: whitespace runs (line breaks
/// included) become one space and pipes are escaped.
pub fn table_cell(text: &str) -> String {
	text.split_whitespace()
		.collect::<Vec<_>>()
		.join(" ")
		.replace('|', "\\|")
}

/// Two-column, left-aligned table. Empty when there are no rows.
pub fn table(headers: [&str; 2], rows: &[(String, String)]) -> String {
	if rows.is_empty() {
		return String::new();
	}
	let mut out = format!("| {} | {} |\n|:----|:----|", headers[0], headers[1]);
	for (left, right) in rows {
		out.push_str(&format!("\n| {} | {} |", table_cell(left), table_cell(right)));
	}
	out
}

/// Bold label introducing a section.
pub fn label(text: &str) -> String {
	format!("**{text}**")
}

/// Bulleted list, one entry per line.
pub fn bullet_list(items: &[String]) -> String {
	items
		.iter()
		.map(|item| format!("- {item}"))
		.collect::<Vec<_>>()
		.join("\n")
}
