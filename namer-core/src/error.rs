//! Error types for the name generation library.
//!
//! Only construction can fail. Once an `Engine` exists, every query returns
//! a (possibly empty) name instead of an error.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The four table kinds every tag must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
	Name,
	Town,
	River,
	Place,
}

impl fmt::Display for TableKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			TableKind::Name => "name",
			TableKind::Town => "town",
			TableKind::River => "river",
			TableKind::Place => "place",
		};
		f.write_str(label)
	}
}

/// A provider could not hand out the bytes of a resource.
#[derive(Debug, Error)]
pub enum FetchError {
	/// No resource is stored under this path.
	#[error("resource '{path}' not found")]
	NotFound {
		/// Requested resource path.
		path: String,
	},

	/// The resource path points outside the provider's root folder.
	#[error("resource '{path}' is outside the data folder")]
	OutsideRoot {
		/// Requested resource path.
		path: String,
	},

	/// The resource exists but reading it failed.
	#[error("failed to read resource '{path}': {source}")]
	Io {
		/// Requested resource path.
		path: String,
		#[source]
		source: io::Error,
	},
}

/// A single table (or the configuration) could not be loaded.
#[derive(Debug, Error)]
pub enum TableError {
	#[error(transparent)]
	Fetch(#[from] FetchError),

	#[error("malformed data: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Construction of an `Engine` failed.
///
/// No partially loaded engine is ever returned alongside this error.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The top-level tag configuration is missing or malformed.
	#[error("unable to read configuration '{path}': {source}")]
	Config {
		path: String,
		#[source]
		source: TableError,
	},

	/// One table of one tag is missing or malformed.
	#[error("unable to read {kind} data for tag '{tag}': {source}")]
	Table {
		tag: String,
		kind: TableKind,
		#[source]
		source: TableError,
	},

	/// A loader thread panicked before reporting its tags.
	#[error("loader thread panicked while loading tag '{tag}'")]
	LoaderPanicked {
		/// First tag of the chunk handled by the thread.
		tag: String,
	},
}

/// Errors raised while writing or reading a compiled table snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("failed to encode snapshot: {0}")]
	Encode(#[source] postcard::Error),

	#[error("failed to decode snapshot: {0}")]
	Decode(#[source] postcard::Error),

	#[error("snapshot I/O failed at '{path}': {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error(transparent)]
	Load(#[from] LoadError),
}
