use std::path::Path;

use thiserror::Error;

use super::Assembly;

/// Export format version understood by this reader.
pub const FORMAT_VERSION: u32 = 1;

/// Errors raised while loading assembly metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
	/// The metadata export could not be read.
	#[error("failed to read metadata from {path}: {source}")]
	Io {
		/// Path that failed.
		path: String,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// The export is not well-formed.
	#[error("malformed metadata: {0}")]
	Malformed(#[from] serde_json::Error),
	/// The export was produced by an incompatible exporter.
	#[error("unsupported metadata format version {found} (expected {expected})", expected = FORMAT_VERSION)]
	UnsupportedVersion {
		/// Version declared by the export.
		found: u32,
	},
}

/// Parse an assembly from its JSON metadata export.
pub fn parse_assembly(text: &str) -> Result<Assembly, MetadataError> {
	let assembly: Assembly = serde_json::from_str(text)?;
	if assembly.format_version != FORMAT_VERSION {
		return Err(MetadataError::UnsupportedVersion {
			found: assembly.format_version,
		});
	}
	Ok(assembly)
}

/// Read and parse a metadata export from disk.
pub async fn read_assembly(path: &Path) -> Result<Assembly, MetadataError> {
	let text = tokio::fs::read_to_string(path)
		.await
		.map_err(|source| MetadataError::Io {
			path: path.display().to_string(),
			source,
		})?;
	parse_assembly(&text)
}
