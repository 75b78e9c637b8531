//! Shared test helpers for workspace crates.
//!
//! Everything here produces raw little-endian bytes laid out the way compiled
//! resources are stored on disk, so tests can build synthetic files without
//! shipping binary fixtures.

mod edit_info;
mod manifest;
mod refs;
mod resource;
mod writer;

pub use edit_info::EditInfoBuilder;
pub use manifest::{EnumSpec, FieldSpec, ManifestBuilder, StructSpec};
pub use refs::ExternalRefsBuilder;
pub use resource::{BLOCK_ENTRY_SIZE, BLOCK_TABLE_START, ResourceBuilder};
pub use writer::ByteWriter;

use std::path::{Path, PathBuf};

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve the workspace target directory.
pub fn target_dir() -> PathBuf {
	std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| workspace_root().join("target"))
}

/// Write `bytes` to a scratch file under the target directory and return its path.
///
/// Callers pick unique names; tests run in parallel.
pub fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
	let dir = target_dir().join("resdoc-test-files");
	std::fs::create_dir_all(&dir).expect("create scratch directory");
	let path = dir.join(name);
	std::fs::write(&path, bytes).expect("write scratch file");
	path
}
