//! Sources of raw table data.
//!
//! A `Provider` hands out the bytes stored under a resource path. The engine
//! decodes them; providers know nothing about table shapes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::FetchError;
use crate::io;

/// Something that can hand out the raw bytes of a named resource.
///
/// Providers are queried from several loader threads at once during
/// construction, hence the `Sync` bound.
pub trait Provider: Sync {
	/// Returns the bytes stored under `path`.
	///
	/// # Errors
	/// Returns `FetchError::NotFound` if nothing is stored under `path`,
	/// `FetchError::OutsideRoot` if `path` leaves the provider's root, or
	/// `FetchError::Io` if reading failed.
	fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError>;
}

/// Built-in data set compiled into the binary.
///
/// Holds the `fantasy-elf01` and `fantasy-human01` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProvider;

const EMBEDDED: &[(&str, &str)] = &[
	("config.json", include_str!("../data/config.json")),
	("fantasy-elf01/name.json", include_str!("../data/fantasy-elf01/name.json")),
	("fantasy-elf01/town.json", include_str!("../data/fantasy-elf01/town.json")),
	("fantasy-elf01/river.json", include_str!("../data/fantasy-elf01/river.json")),
	("fantasy-elf01/place.json", include_str!("../data/fantasy-elf01/place.json")),
	("fantasy-human01/name.json", include_str!("../data/fantasy-human01/name.json")),
	("fantasy-human01/town.json", include_str!("../data/fantasy-human01/town.json")),
	("fantasy-human01/river.json", include_str!("../data/fantasy-human01/river.json")),
	("fantasy-human01/place.json", include_str!("../data/fantasy-human01/place.json")),
];

impl Provider for EmbeddedProvider {
	fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
		let key = path.trim_start_matches('/');
		EMBEDDED
			.iter()
			.find(|(name, _)| *name == key)
			.map(|(_, contents)| contents.as_bytes().to_vec())
			.ok_or_else(|| FetchError::NotFound { path: path.to_owned() })
	}
}

/// Reads resources from files below a root folder.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
	root: PathBuf,
}

impl DirectoryProvider {
	/// Creates a provider rooted at `root`.
	///
	/// Both `"."` and `"./"` resolve to the current working directory.
	pub fn new<P: AsRef<Path>>(root: P) -> Self {
		Self { root: io::normalize_folder(root.as_ref()) }
	}

	/// Folder every resource path is resolved against.
	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl Provider for DirectoryProvider {
	fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
		let file = io::resource_path(&self.root, path)
			.ok_or_else(|| FetchError::OutsideRoot { path: path.to_owned() })?;
		io::read_bytes(file, path)
	}
}

/// In-memory provider, mostly useful for tests and hand-built data sets.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
	resources: HashMap<String, Vec<u8>>,
}

impl MemoryProvider {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `contents` under `path`, replacing any previous value.
	///
	/// Leading `/` are ignored, so `/a.json` and `a.json` name the same resource.
	pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) -> &mut Self {
		self.resources.insert(path.trim_start_matches('/').to_owned(), contents.into());
		self
	}
}

impl Provider for MemoryProvider {
	fn fetch(&self, path: &str) -> Result<Vec<u8>, FetchError> {
		self.resources
			.get(path.trim_start_matches('/'))
			.cloned()
			.ok_or_else(|| FetchError::NotFound { path: path.to_owned() })
	}
}
