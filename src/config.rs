//! Configuration file management
//!
//! Handles reading genbuild's TOML configuration from the project root and
//! the user's config directory.

use crate::menu::Locale;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root
pub const PROJECT_CONFIG_FILE: &str = ".genbuild.toml";

/// C++ standard used when nothing else is configured
pub const DEFAULT_CXX_STD: u32 = 17;

/// External build command used to compile a batch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// pybind11's `Pybind11Extension` driven through setuptools' `build_ext`
    #[default]
    Setuptools,
    /// The C++ compiler driver invoked directly
    Cxx,
}

impl Backend {
    /// Name shown in logs and banners
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Setuptools => "setuptools",
            Self::Cxx => "cxx",
        }
    }
}

/// Application configuration loaded from TOML files
///
/// Relative paths are resolved against the project root.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Directories scanned for generator sources
    #[serde(default)]
    pub generator_dirs: Option<Vec<String>>,

    /// Directory receiving compiled modules
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Vendored pybind11 headers
    #[serde(default)]
    pub pybind11_include: Option<String>,

    /// Source file extension (without the dot)
    #[serde(default)]
    pub source_extension: Option<String>,

    /// C++ language standard (`17` means `-std=c++17`)
    #[serde(default)]
    pub cxx_std: Option<u32>,

    /// Build backend
    #[serde(default)]
    pub backend: Option<Backend>,

    /// Python interpreter owning setuptools/pybind11
    #[serde(default)]
    pub python: Option<String>,

    /// Menu language
    #[serde(default)]
    pub language: Option<Locale>,
}

impl Config {
    /// Load configuration for a project root, or from an explicit file.
    /// Priority: `custom_path` -> `<root>/.genbuild.toml` -> `~/.config/genbuild/config.toml`
    ///
    /// An explicit path must exist; the default locations are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if config file reading or parsing fails.
    pub fn load_with_options(root: &Path, custom_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = custom_path {
            return Self::load_from(path);
        }

        let local = root.join(PROJECT_CONFIG_FILE);
        if local.exists() {
            return Self::load_from(&local);
        }

        if let Some(config_dir) = Self::user_config_dir() {
            let config_path = config_dir.join("config.toml");
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has unknown value types.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse genbuild config")
    }

    fn load_from(path: &Path) -> Result<Self> {
        crate::debug!("loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    fn user_config_dir() -> Option<PathBuf> {
        // Check XDG_CONFIG_HOME first
        if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join("genbuild"));
        }

        // Fall back to ~/.config/genbuild
        dirs::home_dir().map(|home| home.join(".config").join("genbuild"))
    }

    /// Effective C++ standard
    #[must_use]
    pub fn cxx_std(&self) -> u32 {
        self.cxx_std.unwrap_or(DEFAULT_CXX_STD)
    }

    /// Effective backend
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    /// Effective source extension, without a leading dot
    #[must_use]
    pub fn source_extension(&self) -> String {
        self.source_extension
            .as_deref()
            .map_or(crate::DEFAULT_SOURCE_EXTENSION, |ext| ext.trim_start_matches('.'))
            .to_string()
    }
}
