//! Shared test helpers and utilities

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Path to the genbuild binary built for this test run
#[allow(dead_code)]
pub(crate) fn genbuild_binary() -> &'static str {
    env!("CARGO_BIN_EXE_genbuild")
}

/// A genbuild command isolated from the caller's environment and config
///
/// `HOME` and `XDG_CONFIG_HOME` point into `root` so no user config is read.
#[allow(dead_code)]
pub(crate) fn genbuild_in(root: &Path) -> Command {
    let mut cmd = Command::new(genbuild_binary());
    cmd.current_dir(root)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("GENBUILD_ROOT")
        .env_remove("GENBUILD_OUTPUT_DIR")
        .env_remove("GENBUILD_DEBUG");
    cmd
}

/// Source text of a generator exposing module `name`
#[allow(dead_code)]
pub(crate) fn generator_source(name: &str) -> String {
    format!(
        "#include <pybind11/pybind11.h>\n#include \"testlib.h\"\n\n\
         PYBIND11_MODULE({name}, m) {{\n    m.doc() = \"{name} generator\";\n}}\n"
    )
}

/// Create a project whose `generators/` holds the given `(file, module)` pairs
#[allow(dead_code)]
pub(crate) fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let generators = temp.path().join("generators");
    fs::create_dir_all(&generators).expect("Failed to create generators dir");
    fs::create_dir_all(temp.path().join("testlib")).expect("Failed to create testlib dir");

    for (file, module) in files {
        write_generator(&generators, file, module);
    }
    temp
}

/// Write one generator source into `dir`
#[allow(dead_code)]
pub(crate) fn write_generator(dir: &Path, file: &str, module: &str) -> PathBuf {
    let path = dir.join(file);
    fs::write(&path, generator_source(module)).expect("Failed to write generator");
    path
}
