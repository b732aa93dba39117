//! CLI entrypoint.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use asmdoc::AsmDoc;
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Render a .NET assembly's public API and XML documentation as one Markdown file.
struct Cli {
	/// Metadata export of the assembly (e.g. `Demo.json`); `Demo.xml` is used for comments
	input: PathBuf,

	/// Additional directory searched for the comment file (repeatable)
	#[arg(short = 's', long = "search-dir", value_name = "DIR")]
	search_dirs: Vec<PathBuf>,

	/// Write the document here instead of next to the input
	#[arg(short = 'O', long, value_name = "FILE")]
	output: Option<PathBuf>,

	/// Heading level of the assembly title (1-3)
	#[arg(short = 'l', long, default_value_t = 1)]
	heading_level: usize,

	/// Report every undocumented entity and unresolved reference
	#[arg(short = 'v', long, default_value_t = false)]
	verbose: bool,

	/// Suppress progress and warnings
	#[arg(short = 'q', long, default_value_t = false)]
	silent: bool,

	/// Disable ANSI colors in CLI output
	#[arg(long, default_value_t = false)]
	no_color: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let cli = Cli::parse();
	let color = should_color_output(&cli);

	let asmdoc = AsmDoc::new()
		.with_search_dirs(cli.search_dirs.iter().cloned())
		.with_output(cli.output.clone())
		.with_heading_level(cli.heading_level)
		.with_verbose(cli.verbose)
		.with_silent(cli.silent);

	if let Err(e) = asmdoc.generate(&cli.input).await {
		if color {
			eprintln!("{} {e}", "Error:".red().bold());
		} else {
			eprintln!("Error: {e}");
		}
		process::exit(1);
	}
}

fn should_color_output(cli: &Cli) -> bool {
	if cli.no_color {
		return false;
	}
	if std::env::var_os("NO_COLOR").is_some() {
		return false;
	}
	if std::env::var("TERM").ok().as_deref() == Some("dumb") {
		return false;
	}
	std::io::stderr().is_terminal()
}
