//! Extension type definitions
//!
//! A generator is a C++ source exposing a pybind11 module. Discovery yields
//! one [`ModuleSpec`] per generator; the builder turns each into an
//! [`ExtensionTarget`] for the external compiler.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// A buildable unit: the module name found in a source and that source
///
/// The name is both the compiled module's import name and the artifact's
/// base name. Two sources declaring the same name are not detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleSpec {
    /// Name captured from `PYBIND11_MODULE(<name>, ...)`
    pub name: String,
    /// Path to the source file
    pub source: PathBuf,
}

impl ModuleSpec {
    /// Create a module descriptor
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// File name of the source, for menu listings
    #[must_use]
    pub fn source_file_name(&self) -> String {
        self.source
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned())
    }

    /// Include directories for compiling this module
    ///
    /// Always the source's own directory; `../testlib` next to it when that
    /// exists; the vendored pybind11 headers when given. Sorted, no duplicates.
    #[must_use]
    pub fn include_dirs(&self, local_pybind11_include: Option<&Path>) -> Vec<PathBuf> {
        let mut dirs = BTreeSet::new();

        if let Some(parent) = self.source.parent() {
            dirs.insert(parent.to_path_buf());

            if let Some(grandparent) = parent.parent() {
                let testlib = grandparent.join("testlib");
                if testlib.exists() {
                    dirs.insert(testlib);
                }
            }
        }

        if let Some(include) = local_pybind11_include {
            dirs.insert(include.to_path_buf());
        }

        dirs.into_iter().collect()
    }

    /// The build target handed to the external compiler
    #[must_use]
    pub fn extension_target(
        &self,
        local_pybind11_include: Option<&Path>,
        cxx_std: u32,
    ) -> ExtensionTarget {
        ExtensionTarget {
            name: self.name.clone(),
            sources: vec![self.source.clone()],
            include_dirs: self.include_dirs(local_pybind11_include),
            cxx_std,
        }
    }
}

/// One extension as the external build command sees it
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ExtensionTarget {
    /// Module name
    pub name: String,
    /// Source files
    pub sources: Vec<PathBuf>,
    /// Header search path
    pub include_dirs: Vec<PathBuf>,
    /// C++ standard (17 means C++17)
    pub cxx_std: u32,
}

/// Where the external builder says a module's shared library is
///
/// The file is not guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArtifact {
    /// Module name
    pub module: String,
    /// Expected location of the compiled module
    pub path: PathBuf,
}

/// Result of building a batch
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Artifacts now present in the output directory
    pub copied: Vec<PathBuf>,

    /// Modules whose artifact was not produced
    pub missing: Vec<String>,

    /// Time spent compiling and copying
    pub duration: Duration,
}

impl BuildReport {
    /// Check if every module in the batch produced an artifact
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Errors raised by an external build command
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to start {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{step} failed with exit code {code}\n{output}")]
    Failed {
        step: String,
        code: String,
        output: String,
    },

    #[error("Could not read build result from {program}: {message}")]
    Protocol { program: String, message: String },
}

impl BuildError {
    /// Failure of `step`; a missing exit code (killed by signal) reads as "unknown"
    #[must_use]
    pub fn failed(step: impl Into<String>, code: Option<i32>, output: impl Into<String>) -> Self {
        Self::Failed {
            step: step.into(),
            code: code.map_or_else(|| "unknown".to_string(), |c| c.to_string()),
            output: output.into(),
        }
    }
}
