use std::path::PathBuf;

use crate::description::DescriptionError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("failed to read {path:?}")]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to write {path:?}")]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("malformed automaton in {path:?}")]
	Description {
		path: PathBuf,
		#[source]
		source: DescriptionError,
	},
}
