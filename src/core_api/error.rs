use std::fmt;

use crate::comments::CommentError;
use crate::metadata::MetadataError;

/// Aggregate errors produced by the asmdoc API.
#[derive(Debug)]
pub enum AsmDocError {
	/// The metadata export could not be loaded.
	Metadata(MetadataError),
	/// The comment file could not be loaded.
	Comments(CommentError),
	/// Failed to write the output document.
	Io(std::io::Error),
	/// Invalid input paths provided by the user.
	InvalidInput(String),
}

impl fmt::Display for AsmDocError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Metadata(err) => write!(f, "{err}"),
			Self::Comments(err) => write!(f, "{err}"),
			Self::Io(err) => write!(f, "{err}"),
			Self::InvalidInput(message) => write!(f, "{message}"),
		}
	}
}

impl std::error::Error for AsmDocError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Metadata(err) => Some(err),
			Self::Comments(err) => Some(err),
			Self::Io(err) => Some(err),
			Self::InvalidInput(_) => None,
		}
	}
}

impl From<MetadataError> for AsmDocError {
	fn from(err: MetadataError) -> Self {
		Self::Metadata(err)
	}
}

impl From<CommentError> for AsmDocError {
	fn from(err: CommentError) -> Self {
		Self::Comments(err)
	}
}

impl From<std::io::Error> for AsmDocError {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

/// Result type returned by the asmdoc library.
pub type Result<T> = std::result::Result<T, AsmDocError>;
