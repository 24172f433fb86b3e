//! Native extension building
//!
//! Finds C++ generator sources that expose a pybind11 module and compiles
//! them into importable shared libraries (`.so` / `.pyd`).
//!
//! Supported build backends:
//! - setuptools (`Pybind11Extension` + `build_ext`), the default
//! - Direct C++ compiler invocation (`CXX`)

pub mod builder;
pub mod cxx_extension;
pub mod detector;
pub mod setuptools_extension;
pub mod types;

pub use builder::{ExtensionBuilder, ExtensionCompiler, install_artifacts};
pub use cxx_extension::CxxCompiler;
pub use detector::{discover_modules, extract_module_name, source_files};
pub use setuptools_extension::SetuptoolsCompiler;
pub use types::{BuildError, BuildReport, BuiltArtifact, ExtensionTarget, ModuleSpec};
