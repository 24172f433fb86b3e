//! Command implementations

pub(crate) mod build_ext;
pub(crate) mod list;
pub(crate) mod menu;

use crate::GlobalArgs;
use anyhow::{Context, Result};
use genbuild::{
    Backend, Config, CxxCompiler, ExtensionCompiler, Locale, ProjectLayout, PythonToolchain,
    SetuptoolsCompiler,
};
use std::env;
use std::path::PathBuf;

/// Settings resolved from the command line, the config file and the environment
#[derive(Debug)]
pub(crate) struct Session {
    pub(crate) config: Config,
    pub(crate) layout: ProjectLayout,
    pub(crate) locale: Locale,
    backend: Backend,
    python: Option<String>,
    verbose: bool,
}

impl Session {
    /// Resolve the project root and load its configuration
    pub(crate) fn load(args: &GlobalArgs) -> Result<Self> {
        let root = match &args.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to determine current directory")?,
        };
        let root = std::path::absolute(&root)
            .with_context(|| format!("Invalid project root: {}", root.display()))?;

        let config = Config::load_with_options(&root, args.config.as_deref())?;
        let layout = ProjectLayout::from_config(root, &config);
        let locale = args.lang.or(config.language).unwrap_or_default();
        let backend = args.backend.unwrap_or_else(|| config.backend());
        let python = args.python.clone().or_else(|| config.python.clone());

        genbuild::debug!(
            "root={} output={} backend={}",
            layout.root.display(),
            layout.output_dir.display(),
            backend.name()
        );

        Ok(Self {
            config,
            layout,
            locale,
            backend,
            python,
            verbose: args.verbose,
        })
    }

    /// Verify the Python toolchain and create the configured backend
    ///
    /// A missing interpreter, `setuptools` or `pybind11` ends the run.
    pub(crate) fn compiler(&self) -> Result<Box<dyn ExtensionCompiler>> {
        let toolchain = PythonToolchain::detect(self.python.as_deref())?;
        genbuild::debug!(
            "Python {} with pybind11 headers at {}",
            toolchain.version,
            toolchain.pybind11_include.display()
        );

        Ok(match self.backend {
            Backend::Setuptools => Box::new(SetuptoolsCompiler::new(
                toolchain.python.clone(),
                self.verbose,
            )),
            Backend::Cxx => Box::new(CxxCompiler::new(toolchain, self.verbose)),
        })
    }

    /// Default directory of the packaging descriptor
    pub(crate) fn package_dir(&self) -> PathBuf {
        self.layout.resolve(genbuild::paths::DEFAULT_GENERATOR_DIRS[0])
    }
}
