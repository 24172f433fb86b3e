//! Build toolchain and genbuild environment variable handling.

use std::env;

// Helper for boolean environment variables that accept "1", "true", "yes"
fn is_enabled(var: &str) -> bool {
    env::var(var).ok().is_some_and(|s| {
        let s = s.to_lowercase();
        s == "1" || s == "true" || s == "yes"
    })
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|s| !s.trim().is_empty())
}

// Toolchain selection
// PYTHON picks the interpreter that owns setuptools/pybind11; CXX and the
// flag variables are only consulted by the direct compiler backend.

/// Get the Python interpreter override (`PYTHON`).
pub fn python() -> Option<String> {
    non_empty("PYTHON")
}

/// Get the C++ compiler driver (`CXX`).
pub fn cxx() -> Option<String> {
    non_empty("CXX")
}

/// Get extra C++ compiler flags (`CXXFLAGS`), split on whitespace.
pub fn cxxflags() -> Vec<String> {
    split_flags("CXXFLAGS")
}

/// Get extra linker flags (`LDFLAGS`), split on whitespace.
pub fn ldflags() -> Vec<String> {
    split_flags("LDFLAGS")
}

fn split_flags(var: &str) -> Vec<String> {
    env::var(var)
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

// genbuild settings

/// Get the output directory override (`GENBUILD_OUTPUT_DIR`).
pub fn output_dir() -> Option<String> {
    non_empty("GENBUILD_OUTPUT_DIR")
}

/// Check whether debug logging was requested (`GENBUILD_DEBUG`).
pub fn debug_requested() -> bool {
    is_enabled("GENBUILD_DEBUG")
}
