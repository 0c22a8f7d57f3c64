use std::io::Write;
use std::path::{Component, Path, PathBuf};
use std::{env, fs, io};

use tempfile::NamedTempFile;

use crate::error::FetchError;

/// Reads a whole file into memory.
///
/// A missing file is reported as `FetchError::NotFound`, every other
/// failure as `FetchError::Io`. `label` is the resource path as requested
/// by the caller and is what ends up in the error.
pub(crate) fn read_bytes<P: AsRef<Path>>(filename: P, label: &str) -> Result<Vec<u8>, FetchError> {
	fs::read(filename).map_err(|source| match source.kind() {
		io::ErrorKind::NotFound => FetchError::NotFound { path: label.to_owned() },
		_ => FetchError::Io { path: label.to_owned(), source },
	})
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `data/config.json` + `"bin"` → `data/config.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(
	input_path: P,
	output_extension: &str,
) -> io::Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Input path has no filename"))?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Writes `contents` to `path` through a temporary file in the same folder.
///
/// The temporary file is renamed over `path` only once fully written, so a
/// crash or a full disk never leaves a partial file behind.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
	let parent = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp = NamedTempFile::new_in(parent)?;
	temp.write_all(contents)?;
	temp.as_file().sync_all()?;
	temp.persist(path).map_err(|err| err.error)?;
	Ok(())
}

/// Joins a resource path onto a root folder.
///
/// Resource paths in the configuration are written root-relative
/// (`/fantasy-elf01/name.json`), so leading separators are stripped
/// instead of producing an absolute path. Paths with `..` components are
/// refused (`None`): a resource never resolves outside `root`.
pub(crate) fn resource_path(root: &Path, resource: &str) -> Option<PathBuf> {
	let relative = Path::new(resource.trim_start_matches(['/', '\\']));
	let escapes = relative
		.components()
		.any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
	if escapes {
		return None;
	}
	Some(root.join(relative))
}
