//! genbuild internal library code

/// Extension of generator sources scanned by default
pub const DEFAULT_SOURCE_EXTENSION: &str = "cpp";

pub mod config;
pub mod debug;
pub mod env_vars;
pub mod extensions;
pub mod menu;
pub mod package;
pub mod paths;
pub mod platform;
pub mod python;

// Re-export common types for convenience
pub use config::{Backend, Config};
pub use debug::{debug_log, init_debug, is_debug_enabled};
pub use extensions::{
    BuildError, BuildReport, BuiltArtifact, CxxCompiler, ExtensionBuilder, ExtensionCompiler,
    ExtensionTarget, ModuleSpec, SetuptoolsCompiler, discover_modules, extract_module_name,
};
pub use menu::{Locale, Menu, Selection, parse_selection};
pub use package::{METADATA, PackageError, PackageMetadata, discover_extensions};
pub use paths::ProjectLayout;
pub use platform::os_name;
pub use python::{PythonToolchain, ToolchainError};
