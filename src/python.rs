//! Python toolchain detection
//!
//! Compiled modules are loaded by a Python interpreter, so that interpreter
//! decides the headers, the pybind11 version and the extension suffix. This
//! module locates it and checks that `setuptools` and `pybind11` import.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Errors raised while probing the Python toolchain
#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("Python interpreter not found (tried {tried}). Set PYTHON or add python3 to PATH.")]
    PythonNotFound { tried: String },

    #[error("{module} is required. {hint}")]
    MissingModule { module: String, hint: String },

    #[error("Failed to query {python}: {detail}")]
    Probe { python: String, detail: String },
}

/// Probe printing one `key=value` line per fact the builders need
const PROBE_SCRIPT: &str = r#"
import sysconfig
import pybind11
print("pybind11_include=" + pybind11.get_include())
print("python_include=" + sysconfig.get_paths()["include"])
print("ext_suffix=" + (sysconfig.get_config_var("EXT_SUFFIX") or ""))
print("version=" + sysconfig.get_python_version())
"#;

/// A Python interpreter able to build pybind11 extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonToolchain {
    /// Interpreter executable
    pub python: PathBuf,
    /// `pybind11.get_include()`
    pub pybind11_include: PathBuf,
    /// Python's own C headers
    pub python_include: PathBuf,
    /// Suffix of compiled modules, e.g. `.cpython-312-x86_64-linux-gnu.so`
    pub ext_suffix: String,
    /// `major.minor`
    pub version: String,
}

impl PythonToolchain {
    /// Locate an interpreter and verify `setuptools` and `pybind11`.
    ///
    /// Priority order for the interpreter:
    /// 1. Explicit hint (CLI/config)
    /// 2. `PYTHON` environment variable
    /// 3. `python3`, then `python`, in PATH
    ///
    /// # Errors
    ///
    /// Returns an error if no interpreter is found or a required module is
    /// missing. Callers treat this as fatal.
    pub fn detect(hint: Option<&str>) -> Result<Self, ToolchainError> {
        let python = find_python(hint)?;
        crate::debug!("using Python interpreter {}", python.display());

        require_module(&python, "setuptools", "Install it with `pip install setuptools`.")?;
        require_module(
            &python,
            "pybind11",
            "Install it with `pip install pybind11` inside your active Python environment.",
        )?;

        Self::probe(python)
    }

    fn probe(python: PathBuf) -> Result<Self, ToolchainError> {
        let mut cmd = Command::new(&python);
        cmd.args(["-c", PROBE_SCRIPT]);
        crate::debug::debug_command(&cmd);

        let output = cmd.output().map_err(|e| ToolchainError::Probe {
            python: python.display().to_string(),
            detail: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(ToolchainError::Probe {
                python: python.display().to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::from_probe_output(python, &stdout)
    }

    /// Build a toolchain from the probe's `key=value` lines
    ///
    /// # Errors
    ///
    /// Returns an error if an include path is missing from the output.
    pub fn from_probe_output(python: PathBuf, stdout: &str) -> Result<Self, ToolchainError> {
        let field = |key: &str| {
            stdout.lines().find_map(|line| {
                line.strip_prefix(key)
                    .and_then(|rest| rest.strip_prefix('='))
                    .map(|value| value.trim().to_string())
            })
        };
        let missing = |key: &str| ToolchainError::Probe {
            python: python.display().to_string(),
            detail: format!("probe did not report {key}"),
        };

        let pybind11_include =
            field("pybind11_include").ok_or_else(|| missing("pybind11_include"))?;
        let python_include = field("python_include").ok_or_else(|| missing("python_include"))?;
        let ext_suffix = field("ext_suffix")
            .filter(|suffix| !suffix.is_empty())
            .unwrap_or_else(|| crate::platform::default_extension_suffix().to_string());
        let version = field("version").unwrap_or_default();

        Ok(Self {
            pybind11_include: PathBuf::from(pybind11_include),
            python_include: PathBuf::from(python_include),
            ext_suffix,
            version,
            python,
        })
    }

    /// File name of the compiled module `name`
    #[must_use]
    pub fn artifact_name(&self, name: &str) -> String {
        format!("{name}{}", self.ext_suffix)
    }
}

/// Find the Python executable without checking its modules
///
/// # Errors
///
/// Returns an error if no candidate exists.
pub fn find_python(hint: Option<&str>) -> Result<PathBuf, ToolchainError> {
    let mut tried = Vec::new();

    for explicit in [hint.map(str::to_string), crate::env_vars::python()]
        .into_iter()
        .flatten()
    {
        if let Some(path) = resolve_executable(&explicit) {
            return Ok(path);
        }
        tried.push(explicit);
    }

    for candidate in ["python3", "python"] {
        if let Some(path) = resolve_executable(candidate) {
            return Ok(path);
        }
        tried.push(candidate.to_string());
    }

    Err(ToolchainError::PythonNotFound {
        tried: tried.join(", "),
    })
}

/// Resolve a program name or path to an existing executable
fn resolve_executable(program: &str) -> Option<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    let output = Command::new(if cfg!(windows) { "where" } else { "which" })
        .arg(program)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let found = PathBuf::from(stdout.lines().next()?.trim());
    found.exists().then_some(found)
}

fn require_module(python: &Path, module: &str, hint: &str) -> Result<(), ToolchainError> {
    let import = format!("import {module}");
    let mut cmd = Command::new(python);
    cmd.arg("-c").arg(&import);
    crate::debug::debug_command(&cmd);

    let imported = cmd.output().is_ok_and(|output| output.status.success());
    if imported {
        Ok(())
    } else {
        Err(ToolchainError::MissingModule {
            module: module.to_string(),
            hint: hint.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_probe_output() {
        let stdout = "pybind11_include=/venv/lib/python3.12/site-packages/pybind11/include\n\
                      python_include=/usr/include/python3.12\n\
                      ext_suffix=.cpython-312-x86_64-linux-gnu.so\n\
                      version=3.12\n";

        let toolchain =
            PythonToolchain::from_probe_output(PathBuf::from("/usr/bin/python3"), stdout).unwrap();

        assert_eq!(
            toolchain.pybind11_include,
            PathBuf::from("/venv/lib/python3.12/site-packages/pybind11/include")
        );
        assert_eq!(toolchain.python_include, PathBuf::from("/usr/include/python3.12"));
        assert_eq!(toolchain.version, "3.12");
        assert_eq!(
            toolchain.artifact_name("igen"),
            "igen.cpython-312-x86_64-linux-gnu.so"
        );
    }

    #[test]
    fn empty_suffix_falls_back_to_platform_default() {
        let stdout = "pybind11_include=/a\npython_include=/b\next_suffix=\n";

        let toolchain =
            PythonToolchain::from_probe_output(PathBuf::from("python3"), stdout).unwrap();

        assert_eq!(
            toolchain.ext_suffix,
            crate::platform::default_extension_suffix()
        );
    }

    #[test]
    fn missing_include_is_an_error() {
        let result = PythonToolchain::from_probe_output(PathBuf::from("python3"), "version=3.12\n");

        assert!(matches!(result, Err(ToolchainError::Probe { .. })));
    }

    #[test]
    fn explicit_missing_path_is_not_resolved() {
        assert!(resolve_executable("/definitely/not/here/python3").is_none());
    }

    #[test]
    fn missing_module_message_mentions_pip() {
        let err = ToolchainError::MissingModule {
            module: "pybind11".to_string(),
            hint: "Install it with `pip install pybind11` inside your active Python environment."
                .to_string(),
        };

        assert!(err.to_string().starts_with("pybind11 is required."));
        assert!(err.to_string().contains("pip install pybind11"));
    }
}
