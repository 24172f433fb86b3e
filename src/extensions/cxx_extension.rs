//! Direct C++ compiler backend
//!
//! Compiles each target with a GCC/Clang-compatible driver, bypassing
//! setuptools. Header paths and the module suffix still come from the Python
//! interpreter, so the result imports the same way:
//! ```bash
//! c++ -O3 -shared -fPIC -std=c++17 -I<pybind11> -I<python> igen.cpp -o igen<EXT_SUFFIX>
//! ```

use super::builder::ExtensionCompiler;
use super::setuptools_extension::output_tail;
use super::types::{BuildError, BuiltArtifact, ExtensionTarget};
use crate::python::PythonToolchain;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builds extensions by invoking the C++ compiler driver
#[derive(Debug)]
pub struct CxxCompiler {
    /// Compiler driver (`CXX` or `c++`)
    cxx: PathBuf,
    /// Interpreter facts: include paths and extension suffix
    toolchain: PythonToolchain,
    /// Extra compile flags (`CXXFLAGS`)
    cxxflags: Vec<String>,
    /// Extra link flags (`LDFLAGS`)
    ldflags: Vec<String>,
    /// Echo compiler output after successful builds
    verbose: bool,
}

impl CxxCompiler {
    /// Create a backend using `CXX`, `CXXFLAGS` and `LDFLAGS` from the environment
    #[must_use]
    pub fn new(toolchain: PythonToolchain, verbose: bool) -> Self {
        Self {
            cxx: PathBuf::from(crate::env_vars::cxx().unwrap_or_else(|| "c++".to_string())),
            toolchain,
            cxxflags: crate::env_vars::cxxflags(),
            ldflags: crate::env_vars::ldflags(),
            verbose,
        }
    }

    /// Where `target` is written inside `build_dir`
    #[must_use]
    pub fn output_path(&self, target: &ExtensionTarget, build_dir: &Path) -> PathBuf {
        build_dir.join(self.toolchain.artifact_name(&target.name))
    }

    /// Full argument list for one target
    #[must_use]
    pub fn arguments(&self, target: &ExtensionTarget, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-O3",
            "-Wall",
            "-shared",
            "-fPIC",
            "-fvisibility=hidden",
            "-g0",
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(format!("-std=c++{}", target.cxx_std).into());

        let include_dirs = target.include_dirs.iter().chain([
            &self.toolchain.pybind11_include,
            &self.toolchain.python_include,
        ]);
        for dir in include_dirs {
            let mut flag = OsString::from("-I");
            flag.push(dir);
            args.push(flag);
        }

        args.extend(self.cxxflags.iter().map(OsString::from));
        args.extend(target.sources.iter().map(OsString::from));
        args.push("-o".into());
        args.push(output.into());
        args.extend(self.ldflags.iter().map(OsString::from));

        if cfg!(target_os = "macos") {
            args.push("-undefined".into());
            args.push("dynamic_lookup".into());
        }

        args
    }
}

impl ExtensionCompiler for CxxCompiler {
    fn name(&self) -> &str {
        "cxx"
    }

    fn compile(
        &self,
        targets: &[ExtensionTarget],
        build_dir: &Path,
    ) -> Result<Vec<BuiltArtifact>, BuildError> {
        let mut artifacts = Vec::with_capacity(targets.len());

        for target in targets {
            let output_path = self.output_path(target, build_dir);

            let mut cmd = Command::new(&self.cxx);
            cmd.args(self.arguments(target, &output_path));
            crate::debug::debug_command(&cmd);

            let output = cmd.output().map_err(|e| BuildError::Spawn {
                program: self.cxx.display().to_string(),
                message: e.to_string(),
            })?;

            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);

            if !output.status.success() {
                return Err(BuildError::failed(
                    format!("compiling {}", target.name),
                    output.status.code(),
                    output_tail(&stdout, &stderr),
                ));
            }

            if self.verbose {
                print!("{stdout}");
                eprint!("{stderr}");
            }

            artifacts.push(BuiltArtifact {
                module: target.name.clone(),
                path: output_path,
            });
        }

        Ok(artifacts)
    }
}
