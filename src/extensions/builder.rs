//! Extension Builder Orchestration
//!
//! Turns selected modules into build targets, hands the whole batch to an
//! external compiler in one call, then copies the produced shared libraries
//! into the output directory.

use super::types::{BuildError, BuildReport, BuiltArtifact, ExtensionTarget, ModuleSpec};
use crate::paths::ProjectLayout;
use crate::platform::is_extension_artifact;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// An external build command that compiles a batch of extensions
///
/// Implementations must compile every target in one call and report where
/// each module's shared library ended up. A failure of any target fails the
/// batch.
pub trait ExtensionCompiler: Debug {
    /// Short name for messages ("setuptools", "cxx")
    fn name(&self) -> &str;

    /// Compile `targets`, placing outputs and scratch files under `build_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the external command cannot run or fails.
    fn compile(
        &self,
        targets: &[ExtensionTarget],
        build_dir: &Path,
    ) -> Result<Vec<BuiltArtifact>, BuildError>;
}

impl<C: ExtensionCompiler + ?Sized> ExtensionCompiler for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compile(
        &self,
        targets: &[ExtensionTarget],
        build_dir: &Path,
    ) -> Result<Vec<BuiltArtifact>, BuildError> {
        (**self).compile(targets, build_dir)
    }
}

/// Extension builder coordinator
///
/// Every build is forced: the compiler works in a fresh scratch directory
/// that is removed afterwards, so nothing is reused between runs.
#[derive(Debug)]
pub struct ExtensionBuilder<C> {
    /// External build command
    compiler: C,
    /// Where compiled modules are copied
    output_dir: PathBuf,
    /// Vendored pybind11 headers, used while the directory exists
    pybind11_include: PathBuf,
    /// C++ standard for every target
    cxx_std: u32,
    /// Show a spinner while the compiler runs
    show_progress: bool,
}

impl<C: ExtensionCompiler> ExtensionBuilder<C> {
    /// Create a builder for a project layout
    #[must_use]
    pub fn new(compiler: C, layout: &ProjectLayout, cxx_std: u32) -> Self {
        Self {
            compiler,
            output_dir: layout.output_dir.clone(),
            pybind11_include: layout.pybind11_include.clone(),
            cxx_std,
            show_progress: false,
        }
    }

    /// Enable or disable the terminal spinner
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Copy outputs somewhere other than the layout's output directory
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Directory compiled modules are copied into
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Name of the external build command
    #[must_use]
    pub fn compiler_name(&self) -> &str {
        self.compiler.name()
    }

    /// Build targets for the selected modules, in selection order
    ///
    /// The vendored pybind11 headers are looked up again on every call.
    #[must_use]
    pub fn targets(&self, modules: &[ModuleSpec]) -> Vec<ExtensionTarget> {
        let local_include = self
            .pybind11_include
            .is_dir()
            .then_some(self.pybind11_include.as_path());

        modules
            .iter()
            .map(|spec| spec.extension_target(local_include, self.cxx_std))
            .collect()
    }

    /// Build the selected modules in one batch
    ///
    /// An empty selection returns an empty report without running anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler fails or artifacts cannot be copied.
    /// On compiler failure the output directory is left untouched.
    pub fn build(&self, modules: &[ModuleSpec]) -> Result<BuildReport> {
        self.build_targets(&self.targets(modules))
    }

    /// Build prepared targets in one batch and install the results
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler fails or artifacts cannot be copied.
    pub fn build_targets(&self, targets: &[ExtensionTarget]) -> Result<BuildReport> {
        if targets.is_empty() {
            return Ok(BuildReport::default());
        }

        let start_time = Instant::now();
        let scratch = tempfile::Builder::new()
            .prefix("genbuild-")
            .tempdir()
            .context("Failed to create build directory")?;
        crate::debug!(
            "compiling {} target(s) with {} in {}",
            targets.len(),
            self.compiler.name(),
            scratch.path().display()
        );

        let spinner = self.spinner(targets.len());
        let compiled = self.compiler.compile(targets, scratch.path());
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let artifacts = compiled.with_context(|| {
            format!(
                "{} build of {} module(s) failed",
                self.compiler.name(),
                targets.len()
            )
        })?;

        let (copied, missing) = install_artifacts(&artifacts, &self.output_dir)?;

        Ok(BuildReport {
            copied,
            missing,
            duration: start_time.elapsed(),
        })
    }

    fn spinner(&self, count: usize) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!(
            "Compiling {count} module(s) with {}...",
            self.compiler.name()
        ));
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    }
}

/// Copy compiled modules into `output_dir`, overwriting by file name
///
/// Artifacts that were not produced, or that are not extension modules
/// (`.so`/`.pyd`), are skipped and returned as missing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a copy fails.
pub fn install_artifacts(
    artifacts: &[BuiltArtifact],
    output_dir: &Path,
) -> Result<(Vec<PathBuf>, Vec<String>)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let mut copied = Vec::new();
    let mut missing = Vec::new();

    for artifact in artifacts {
        let Some(file_name) = artifact.path.file_name().filter(|name| {
            artifact.path.is_file() && name.to_str().is_some_and(is_extension_artifact)
        }) else {
            crate::debug!(
                "no artifact for {} at {}",
                artifact.module,
                artifact.path.display()
            );
            missing.push(artifact.module.clone());
            continue;
        };

        let target_path = output_dir.join(file_name);
        fs::copy(&artifact.path, &target_path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                artifact.path.display(),
                target_path.display()
            )
        })?;
        crate::debug!(
            "copied {} -> {}",
            artifact.path.display(),
            target_path.display()
        );
        copied.push(target_path);
    }

    Ok((copied, missing))
}
