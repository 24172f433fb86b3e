//! Packaging descriptor for the generator directory
//!
//! Registers every pybind11 source in one generator directory as a build
//! target, the way the directory's `setup.py` does for `pip install .`.
//! Unlike the interactive menu, an unreadable source here is an error.

use crate::config::DEFAULT_CXX_STD;
use crate::extensions::{ExtensionTarget, extract_module_name, source_files};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while collecting package targets
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Generator directory not found: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to read generator source {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Distribution metadata of the generator package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// Metadata registered for the testlib generators
pub const METADATA: PackageMetadata = PackageMetadata {
    name: "testlib-generators",
    version: "0.1.0",
    description: "Pybind11 bindings for testlib generators",
};

/// Header directory shared by every generator: `<dir>/../testlib`
#[must_use]
pub fn testlib_include(dir: &Path) -> PathBuf {
    dir.parent().unwrap_or(dir).join("testlib")
}

/// Collect the build targets of a generator directory
///
/// Sources are taken in path order (no sorting by module name). Each target
/// includes the sibling `testlib` directory and uses C++17.
///
/// # Errors
///
/// Returns an error if the directory is missing or a source cannot be read
/// as UTF-8.
pub fn discover_extensions(
    dir: &Path,
    extension: &str,
) -> Result<Vec<ExtensionTarget>, PackageError> {
    if !dir.is_dir() {
        return Err(PackageError::MissingDirectory(dir.to_path_buf()));
    }

    let include = testlib_include(dir);
    let mut targets = Vec::new();

    for source in source_files(dir, extension) {
        let text =
            std::fs::read_to_string(&source).map_err(|source_err| PackageError::ReadError {
                path: source.clone(),
                source: source_err,
            })?;

        let Some(name) = extract_module_name(&text) else {
            continue;
        };

        targets.push(ExtensionTarget {
            name,
            sources: vec![source],
            include_dirs: vec![include.clone()],
            cxx_std: DEFAULT_CXX_STD,
        });
    }

    Ok(targets)
}
