//! Project layout.
//! Resolves where generator sources live and where compiled modules go,
//! relative to the project root (the directory holding `generators/`).

use crate::config::Config;
use crate::env_vars;
use std::path::{Path, PathBuf};

/// Generator directories scanned by default, relative to the root
pub const DEFAULT_GENERATOR_DIRS: [&str; 2] = ["generators", "testlib/generators"];

/// Output directory for compiled modules, relative to the root
pub const DEFAULT_OUTPUT_DIR: &str = "builds";

/// Vendored pybind11 headers, relative to the root
pub const DEFAULT_PYBIND11_INCLUDE: &str = "pybind11/include";

/// Resolved directories for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root
    pub root: PathBuf,
    /// Directories scanned for generator sources, in scan order
    pub generator_roots: Vec<PathBuf>,
    /// Vendored pybind11 include directory (used only if it exists)
    pub pybind11_include: PathBuf,
    /// Directory compiled modules are copied into
    pub output_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout with every directory at its default location
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            generator_roots: DEFAULT_GENERATOR_DIRS
                .iter()
                .map(|dir| root.join(dir))
                .collect(),
            pybind11_include: root.join(DEFAULT_PYBIND11_INCLUDE),
            output_dir: root.join(DEFAULT_OUTPUT_DIR),
            root,
        }
    }

    /// Layout with config and environment overrides applied.
    /// Priority for the output directory: `GENBUILD_OUTPUT_DIR` -> config -> default.
    #[must_use]
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Self {
        let mut layout = Self::new(root);

        if let Some(dirs) = &config.generator_dirs {
            layout.generator_roots = dirs.iter().map(|dir| layout.resolve(dir)).collect();
        }
        if let Some(include) = &config.pybind11_include {
            layout.pybind11_include = layout.resolve(include);
        }
        if let Some(output) = env_vars::output_dir().or_else(|| config.output_dir.clone()) {
            layout.output_dir = layout.resolve(&output);
        }

        layout
    }

    /// Resolve a possibly relative path against the root
    #[must_use]
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Generator roots that exist on disk
    #[must_use]
    pub fn existing_generator_roots(&self) -> Vec<&Path> {
        self.generator_roots
            .iter()
            .map(PathBuf::as_path)
            .filter(|root| root.is_dir())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_layout() {
        let layout = ProjectLayout::new("/work/project");

        assert_eq!(
            layout.generator_roots,
            vec![
                PathBuf::from("/work/project/generators"),
                PathBuf::from("/work/project/testlib/generators"),
            ]
        );
        assert_eq!(layout.output_dir, PathBuf::from("/work/project/builds"));
        assert_eq!(
            layout.pybind11_include,
            PathBuf::from("/work/project/pybind11/include")
        );
    }

    #[test]
    fn config_overrides_directories() {
        let config = Config {
            generator_dirs: Some(vec!["src/gen".to_string(), "/abs/gen".to_string()]),
            pybind11_include: Some("vendor/pybind11/include".to_string()),
            ..Config::default()
        };

        let layout = ProjectLayout::from_config("/p", &config);

        assert_eq!(
            layout.generator_roots,
            vec![PathBuf::from("/p/src/gen"), PathBuf::from("/abs/gen")]
        );
        assert_eq!(
            layout.pybind11_include,
            PathBuf::from("/p/vendor/pybind11/include")
        );
    }

    #[test]
    fn only_existing_roots_are_reported() {
        let temp = TempDir::new().unwrap();
        let generators = temp.path().join("generators");
        fs::create_dir_all(&generators).unwrap();

        let layout = ProjectLayout::new(temp.path());

        assert_eq!(layout.existing_generator_roots(), vec![generators.as_path()]);
    }
}
