//! setuptools/pybind11 build backend
//!
//! Runs the Python interpreter with a small driver that builds the whole
//! batch with pybind11's `Pybind11Extension` and setuptools' `build_ext`.
//! It's the equivalent of:
//! ```bash
//! python setup.py build_ext --force --build-lib <dir>
//! ```
//! The batch goes to the driver as JSON on stdin; the driver answers with
//! one `GENBUILD_RESULT {...}` line mapping each module to its output path.

use super::builder::ExtensionCompiler;
use super::types::{BuildError, BuiltArtifact, ExtensionTarget};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

/// Prefix of the driver's result line
const RESULT_PREFIX: &str = "GENBUILD_RESULT ";

/// Lines of compiler output kept in error messages
const OUTPUT_TAIL_LINES: usize = 40;

const DRIVER_SCRIPT: &str = r#"
import json
import sys

from setuptools import Distribution
from pybind11.setup_helpers import Pybind11Extension, build_ext

request = json.load(sys.stdin)
targets = request["targets"]

dist = Distribution()
dist.script_name = "genbuild"
dist.ext_modules = [
    Pybind11Extension(
        t["name"],
        t["sources"],
        include_dirs=t["include_dirs"],
        cxx_std=t["cxx_std"],
    )
    for t in targets
]
dist.cmdclass = {"build_ext": build_ext}

cmd = build_ext(dist)
cmd.initialize_options()
cmd.force = True
cmd.build_lib = request["build_lib"]
cmd.build_temp = request["build_temp"]
cmd.finalize_options()
cmd.run()

result = {t["name"]: cmd.get_ext_fullpath(t["name"]) for t in targets}
print("GENBUILD_RESULT " + json.dumps(result), flush=True)
"#;

#[derive(Debug, Serialize)]
struct BuildRequest {
    targets: Vec<ExtensionTarget>,
    build_lib: PathBuf,
    build_temp: PathBuf,
}

/// Builds extensions through setuptools' `build_ext`
///
/// Handles the build in three steps:
/// 1. Serialize the batch and start the driver
/// 2. Let `build_ext` compile and link every extension
/// 3. Read back where each module was written
#[derive(Debug)]
pub struct SetuptoolsCompiler {
    /// Python interpreter with setuptools and pybind11
    python: PathBuf,
    /// Echo the build log after successful builds
    verbose: bool,
}

impl SetuptoolsCompiler {
    /// Create a backend for an interpreter (already verified by toolchain detection)
    #[must_use]
    pub fn new(python: impl Into<PathBuf>, verbose: bool) -> Self {
        Self {
            python: python.into(),
            verbose,
        }
    }

    fn program(&self) -> String {
        self.python.display().to_string()
    }

    fn request_body(
        targets: &[ExtensionTarget],
        build_dir: &Path,
    ) -> Result<Vec<u8>, BuildError> {
        let request = BuildRequest {
            targets: targets.to_vec(),
            build_lib: build_dir.join("lib"),
            build_temp: build_dir.join("temp"),
        };
        serde_json::to_vec(&request).map_err(|e| BuildError::Protocol {
            program: "genbuild".to_string(),
            message: format!("cannot encode build request: {e}"),
        })
    }

    /// Map the driver's result line onto the batch, in target order
    fn parse_result(
        &self,
        stdout: &str,
        targets: &[ExtensionTarget],
    ) -> Result<Vec<BuiltArtifact>, BuildError> {
        let line = stdout
            .lines()
            .rev()
            .find_map(|line| line.strip_prefix(RESULT_PREFIX))
            .ok_or_else(|| BuildError::Protocol {
                program: self.program(),
                message: "driver printed no result line".to_string(),
            })?;

        let paths: HashMap<String, PathBuf> =
            serde_json::from_str(line).map_err(|e| BuildError::Protocol {
                program: self.program(),
                message: e.to_string(),
            })?;

        targets
            .iter()
            .map(|target| {
                paths
                    .get(&target.name)
                    .map(|path| BuiltArtifact {
                        module: target.name.clone(),
                        path: path.clone(),
                    })
                    .ok_or_else(|| BuildError::Protocol {
                        program: self.program(),
                        message: format!("no output path reported for {}", target.name),
                    })
            })
            .collect()
    }
}

impl ExtensionCompiler for SetuptoolsCompiler {
    fn name(&self) -> &str {
        "setuptools"
    }

    fn compile(
        &self,
        targets: &[ExtensionTarget],
        build_dir: &Path,
    ) -> Result<Vec<BuiltArtifact>, BuildError> {
        let start_time = Instant::now();
        let body = Self::request_body(targets, build_dir)?;

        let mut cmd = Command::new(&self.python);
        cmd.arg("-c")
            .arg(DRIVER_SCRIPT)
            .current_dir(build_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        crate::debug::debug_command(&cmd);

        let spawn_error = |e: std::io::Error| BuildError::Spawn {
            program: self.program(),
            message: e.to_string(),
        };

        let mut child = cmd.spawn().map_err(spawn_error)?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&body).map_err(spawn_error)?;
        }
        let output = child.wait_with_output().map_err(spawn_error)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(BuildError::failed(
                "build_ext",
                output.status.code(),
                output_tail(&stdout, &stderr),
            ));
        }

        if self.verbose {
            print!("{stdout}");
            eprint!("{stderr}");
        }
        crate::debug!(
            "build_ext finished {} target(s) in {:?}",
            targets.len(),
            start_time.elapsed()
        );

        self.parse_result(&stdout, targets)
    }
}

/// Last lines of the combined build log
pub(crate) fn output_tail(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout
        .lines()
        .chain(stderr.lines())
        .filter(|line| !line.starts_with(RESULT_PREFIX))
        .collect();
    let skip = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines.into_iter().skip(skip).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str) -> ExtensionTarget {
        ExtensionTarget {
            name: name.to_string(),
            sources: vec![PathBuf::from(format!("/p/generators/{name}.cpp"))],
            include_dirs: vec![PathBuf::from("/p/generators")],
            cxx_std: 17,
        }
    }

    #[test]
    fn request_carries_batch_and_directories() {
        let body =
            SetuptoolsCompiler::request_body(&[target("igen")], Path::new("/tmp/genbuild-x"))
                .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["build_lib"], "/tmp/genbuild-x/lib");
        assert_eq!(value["build_temp"], "/tmp/genbuild-x/temp");
        assert_eq!(value["targets"][0]["name"], "igen");
        assert_eq!(value["targets"][0]["cxx_std"], 17);
        assert_eq!(value["targets"][0]["sources"][0], "/p/generators/igen.cpp");
    }

    #[test]
    fn parses_result_in_target_order() {
        let compiler = SetuptoolsCompiler::new("python3", false);
        let stdout = concat!(
            "building 'igen' extension\n",
            r#"GENBUILD_RESULT {"igen": "/b/lib/igen.so", "bgen": "/b/lib/bgen.so"}"#,
            "\n",
        );

        let artifacts = compiler
            .parse_result(stdout, &[target("bgen"), target("igen")])
            .unwrap();

        assert_eq!(
            artifacts,
            vec![
                BuiltArtifact {
                    module: "bgen".to_string(),
                    path: PathBuf::from("/b/lib/bgen.so"),
                },
                BuiltArtifact {
                    module: "igen".to_string(),
                    path: PathBuf::from("/b/lib/igen.so"),
                },
            ]
        );
    }

    #[test]
    fn missing_result_line_is_protocol_error() {
        let compiler = SetuptoolsCompiler::new("python3", false);

        let result = compiler.parse_result("running build_ext\n", &[target("igen")]);

        assert!(matches!(result, Err(BuildError::Protocol { .. })));
    }

    #[test]
    fn unreported_module_is_protocol_error() {
        let compiler = SetuptoolsCompiler::new("python3", false);

        let result = compiler.parse_result("GENBUILD_RESULT {}\n", &[target("igen")]);

        assert!(
            matches!(result, Err(BuildError::Protocol { message, .. }) if message.contains("igen"))
        );
    }

    #[test]
    fn tail_keeps_last_lines() {
        let stdout: String = (0..100).map(|i| format!("line {i}\n")).collect();

        let tail = output_tail(&stdout, "fatal error: testlib.h: No such file");

        assert_eq!(tail.lines().count(), OUTPUT_TAIL_LINES);
        assert!(tail.ends_with("fatal error: testlib.h: No such file"));
        assert!(!tail.contains("line 0\n"));
    }

    #[test]
    fn missing_interpreter_is_spawn_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let compiler = SetuptoolsCompiler::new("/definitely/not/here/python3", false);

        let result = compiler.compile(&[target("igen")], temp.path());

        assert!(matches!(result, Err(BuildError::Spawn { .. })));
    }
}
