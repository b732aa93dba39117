//! End-to-end runs writing real documents.

use std::fs;
use std::path::Path;

use asmdoc::{AsmDoc, AsmDocError, Diagnostic};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TINY: &str = r#"{
	"format_version": 1,
	"name": "Tiny",
	"types": [
		{"namespace": "Tiny", "name": "Thing", "visibility": "public",
			"base_type": {"kind": "named", "namespace": "System", "name": "Object"}},
		{"namespace": "Tiny", "name": "Secret", "visibility": "internal"}
	]
}"#;

const DEMO: &str = r#"{
	"format_version": 1,
	"name": "Demo",
	"version": "1.2.0.0",
	"attributes": [
		{"type_name": "System.Reflection.AssemblyCompanyAttribute", "arguments": ["Acme & Sons"]}
	],
	"types": [
		{"namespace": "Demo", "name": "Widget", "visibility": "public",
			"base_type": {"kind": "named", "namespace": "System", "name": "Object"},
			"properties": [
				{"name": "Size", "property_type": {"kind": "named", "namespace": "System", "name": "Int32"},
					"getter": {"visibility": "public"}}
			],
			"methods": [
				{"name": ".ctor", "visibility": "public", "special_name": true,
					"return_type": {"kind": "named", "namespace": "System", "name": "Void"}},
				{"name": "get_Size", "visibility": "public", "special_name": true,
					"return_type": {"kind": "named", "namespace": "System", "name": "Int32"}},
				{"name": "Resize", "visibility": "public",
					"parameters": [{"name": "size", "param_type": {"kind": "named", "namespace": "System", "name": "Int32"}}],
					"return_type": {"kind": "named", "namespace": "System", "name": "Void"}}
			]},
		{"namespace": "Demo.Util", "name": "Helpers", "visibility": "public", "is_abstract": true, "is_sealed": true,
			"base_type": {"kind": "named", "namespace": "System", "name": "Object"},
			"methods": [
				{"name": "Describe", "visibility": "public", "modifiers": {"is_static": true},
					"parameters": [{"name": "widget", "param_type": {"kind": "named", "namespace": "Demo", "name": "Widget"}}],
					"return_type": {"kind": "named", "namespace": "System", "name": "String"}}
			]}
	]
}"#;

const DEMO_XML: &str = r#"<?xml version="1.0"?>
<doc>
    <assembly><name>Demo</name></assembly>
    <members>
        <member name="T:Demo.Widget">
            <summary>A resizable widget.</summary>
            <remarks>
                Call <see cref="M:Demo.Widget.Resize(System.Int32)"/> to grow it.
                <code>
                    var w = new Widget();
                    w.Resize(3);
                </code>
            </remarks>
            <seealso cref="T:Demo.Util.Helpers"/>
        </member>
        <member name="P:Demo.Widget.Size">
            <summary>Current size.</summary>
            <value>The size in pixels.</value>
        </member>
        <member name="M:Demo.Widget.#ctor">
            <summary>Creates a widget.</summary>
        </member>
        <member name="M:Demo.Widget.Resize(System.Int32)">
            <summary>Changes the <paramref name="size"/>.</summary>
            <param name="size">New size; must be 0 &lt; size.</param>
            <exception cref="T:System.ArgumentOutOfRangeException">When negative.</exception>
        </member>
        <member name="M:Demo.Util.Helpers.Describe(Demo.Widget)">
            <summary>Describes <see cref="T:Demo.Widget">a widget</see>.</summary>
            <returns>Text.</returns>
        </member>
    </members>
</doc>"#;

fn write_inputs(dir: &Path, name: &str, json: &str, xml: Option<&str>) -> std::path::PathBuf {
	let input = dir.join(format!("{name}.json"));
	fs::write(&input, json).unwrap();
	if let Some(xml) = xml {
		fs::write(dir.join(format!("{name}.xml")), xml).unwrap();
	}
	input
}

#[tokio::test(flavor = "current_thread")]
async fn writes_document_next_to_input() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;
	let input = write_inputs(temp_dir.path(), "Tiny", TINY, None);

	let output = AsmDoc::new().with_silent(true).generate(&input).await?;
	assert_eq!(output, temp_dir.path().join("Tiny.md"));

	let expected = "\
# Tiny assembly

| Namespace | Types |
|:----|:----|
| [ `Tiny` ](#tiny-namespace) | [ `Thing` ](#thing-class) |

## Tiny namespace

| Type | Summary |
|:----|:----|
| [ `Thing` ](#thing-class) |  |

### Thing class

```csharp
namespace Tiny
{
    public class Thing
}
```
";
	assert_eq!(fs::read_to_string(&output)?, expected);
	Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn renders_documentation_and_links() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;
	let input = write_inputs(temp_dir.path(), "Demo", DEMO, Some(DEMO_XML));

	let output = AsmDoc::new().with_silent(true).generate(&input).await?;
	let markdown = fs::read_to_string(output)?;

	for expected in [
		"| Version | 1.2.0.0 |",
		"| Company | Acme &amp; Sons |",
		"| [ `Demo` ](#demo-namespace) | [ `Widget` ](#widget-class) |",
		"| [ `Demo.Util` ](#demo.util-namespace) | [ `Helpers` ](#helpers-class) |",
		"| [ `Widget` ](#widget-class) | A resizable widget. |",
		"### Widget class",
		"#### Size property",
		"#### Widget() constructor",
		"#### Resize(int) method",
		"#### Describe(Demo.Widget) method",
		"```csharp\npublic int Size { get; }\n```",
		"```csharp\npublic void Resize(int size)\n```",
		"```csharp\npublic static string Describe(Demo.Widget widget)\n```",
		"```csharp\nnamespace Demo.Util\n{\n    public static class Helpers\n}\n```",
		"**Value**\n\nThe size in pixels.",
		"**Returns**\n\nText.",
		"| Parameter | Description |\n|:----|:----|\n| `size` | New size; must be 0 &lt; size. |",
		"| Exception | Description |\n|:----|:----|\n| T:System.ArgumentOutOfRangeException | When negative. |",
		"**See also**\n\n- [ `T:Demo.Util.Helpers` ](#helpers-class)",
		"| Property | Summary |\n|:----|:----|\n| [ `Size` ](#size-property) | Current size. |",
		"| Method | Summary |\n|:----|:----|\n| [ `Widget()` ](#widget-constructor) | Creates a widget. |\n| [ `Resize(int)` ](#resizeint-method) | Changes the` size `. |",
		"Describes[ `a widget` ](#widget-class).",
		"```csharp\nvar w = new Widget();\nw.Resize(3);\n```",
		"[ `M:Demo.Widget.Resize(System.Int32)` ](#resizeint-method)",
	] {
		assert!(markdown.contains(expected), "missing {expected:?} in\n{markdown}");
	}
	assert!(!markdown.contains("get_Size"));
	assert!(markdown.ends_with("\n"));
	Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn reports_lookup_misses() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;
	let input = write_inputs(temp_dir.path(), "Demo", DEMO, Some(DEMO_XML));

	let asmdoc = AsmDoc::new().with_silent(true);
	let (assembly, comments) = asmdoc.load(&input).await?;
	let rendered = asmdoc.render(&assembly, &comments);
	assert_eq!(
		rendered.diagnostics,
		[
			Diagnostic::UnresolvedReference("T:System.ArgumentOutOfRangeException".into()),
			Diagnostic::MissingDocs("T:Demo.Util.Helpers".into()),
		]
	);
	Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn honours_output_override_and_search_dirs() -> Result<(), Box<dyn std::error::Error>> {
	let input_dir = TempDir::new()?;
	let docs_dir = TempDir::new()?;
	let input = write_inputs(input_dir.path(), "Demo", DEMO, None);
	fs::write(docs_dir.path().join("Demo.xml"), DEMO_XML)?;
	let target = input_dir.path().join("api.md");

	let output = AsmDoc::new()
		.with_silent(true)
		.with_search_dir(docs_dir.path())
		.with_output(Some(target.clone()))
		.with_heading_level(2)
		.generate(&input)
		.await?;
	assert_eq!(output, target);

	let markdown = fs::read_to_string(&target)?;
	assert!(markdown.starts_with("## Demo assembly\n"));
	assert!(markdown.contains("##### Size property"));
	assert!(markdown.contains("A resizable widget."));
	assert!(!input_dir.path().join("Demo.md").exists());
	Ok(())
}

#[tokio::test(flavor = "current_thread")]
async fn load_failures_are_fatal() -> Result<(), Box<dyn std::error::Error>> {
	let temp_dir = TempDir::new()?;

	let missing = temp_dir.path().join("Missing.json");
	let err = AsmDoc::new().with_silent(true).generate(&missing).await.unwrap_err();
	assert!(matches!(err, AsmDocError::Metadata(_)));

	let input = write_inputs(temp_dir.path(), "Broken", TINY, Some("<doc><members>"));
	let err = AsmDoc::new().with_silent(true).generate(&input).await.unwrap_err();
	assert!(matches!(err, AsmDocError::Comments(_)));
	assert!(!temp_dir.path().join("Broken.md").exists());

	let input = write_inputs(
		temp_dir.path(),
		"Future",
		r#"{"format_version": 99, "name": "Future"}"#,
		None,
	);
	let err = AsmDoc::new().with_silent(true).generate(&input).await.unwrap_err();
	assert!(err.to_string().contains("unsupported metadata format version 99"));
	Ok(())
}
