use genbuild::python::find_python;
use genbuild::{ExtensionCompiler, ExtensionTarget, SetuptoolsCompiler};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Minimal stand-in for pybind11's `setup_helpers` on top of plain setuptools
const PYBIND11_INIT: &str = r#"import os


def get_include():
    return os.path.join(os.path.dirname(__file__), "include")
"#;

const PYBIND11_SETUP_HELPERS: &str = r#"from setuptools import Extension
from setuptools.command.build_ext import build_ext


class Pybind11Extension(Extension):
    def __init__(self, name, sources, *args, cxx_std=0, include_dirs=None, **kwargs):
        kwargs.setdefault("language", "c++")
        super().__init__(name, sources, *args, include_dirs=include_dirs or [], **kwargs)
        self.cxx_std = cxx_std
"#;

/// Python interpreter with setuptools and a working C++ compiler, if any
fn build_python() -> Option<PathBuf> {
    let python = find_python(None).ok()?;
    let has_setuptools = Command::new(&python)
        .args(["-c", "import setuptools"])
        .output()
        .is_ok_and(|output| output.status.success());
    let has_compiler = Command::new("c++")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success());

    (has_setuptools && has_compiler).then_some(python)
}

/// Build directory holding the stub `pybind11` package (the driver runs there)
fn build_dir_with_stub(temp: &TempDir) -> PathBuf {
    let build_dir = temp.path().join("build");
    let package = build_dir.join("pybind11");
    fs::create_dir_all(package.join("include")).unwrap();
    fs::write(package.join("__init__.py"), PYBIND11_INIT).unwrap();
    fs::write(package.join("setup_helpers.py"), PYBIND11_SETUP_HELPERS).unwrap();
    build_dir
}

fn generator(dir: &Path, name: &str) -> ExtensionTarget {
    let source = dir.join(format!("{name}.cpp"));
    fs::write(
        &source,
        format!("extern \"C\" void* PyInit_{name}() {{ return nullptr; }}\n"),
    )
    .unwrap();
    ExtensionTarget {
        name: name.to_string(),
        sources: vec![source],
        include_dirs: vec![dir.to_path_buf()],
        cxx_std: 17,
    }
}

#[test]
fn driver_builds_every_target_into_build_lib() {
    let Some(python) = build_python() else {
        eprintln!("skipping: python3 with setuptools and c++ are required");
        return;
    };
    let temp = TempDir::new().unwrap();
    let sources = temp.path().join("generators");
    fs::create_dir_all(&sources).unwrap();
    let build_dir = build_dir_with_stub(&temp);
    let targets = vec![generator(&sources, "bgen"), generator(&sources, "igen")];

    let artifacts = SetuptoolsCompiler::new(python, false)
        .compile(&targets, &build_dir)
        .unwrap();

    let modules: Vec<_> = artifacts.iter().map(|a| a.module.as_str()).collect();
    assert_eq!(modules, vec!["bgen", "igen"]);
    for artifact in &artifacts {
        assert!(artifact.path.is_file(), "missing {}", artifact.path.display());
        assert!(artifact.path.starts_with(build_dir.join("lib")));
    }
}

#[test]
fn driver_rebuilds_up_to_date_targets() {
    let Some(python) = build_python() else {
        eprintln!("skipping: python3 with setuptools and c++ are required");
        return;
    };
    let temp = TempDir::new().unwrap();
    let sources = temp.path().join("generators");
    fs::create_dir_all(&sources).unwrap();
    let build_dir = build_dir_with_stub(&temp);
    let targets = vec![generator(&sources, "igen")];
    let compiler = SetuptoolsCompiler::new(python, false);

    let first = compiler.compile(&targets, &build_dir).unwrap();
    let output = first.first().unwrap().path.clone();
    fs::write(&output, b"stale").unwrap();
    compiler.compile(&targets, &build_dir).unwrap();

    assert_ne!(fs::read(&output).unwrap(), b"stale");
}

#[test]
fn compile_errors_fail_the_batch() {
    let Some(python) = build_python() else {
        eprintln!("skipping: python3 with setuptools and c++ are required");
        return;
    };
    let temp = TempDir::new().unwrap();
    let sources = temp.path().join("generators");
    fs::create_dir_all(&sources).unwrap();
    let build_dir = build_dir_with_stub(&temp);
    let good = generator(&sources, "igen");
    let broken = generator(&sources, "broken");
    fs::write(broken.sources.first().unwrap(), "this is not C++\n").unwrap();

    let err = SetuptoolsCompiler::new(python, false)
        .compile(&[good, broken], &build_dir)
        .unwrap_err();

    assert!(err.to_string().contains("build_ext failed with exit code"));
}
