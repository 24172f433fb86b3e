//! Platform detection
//!
//! Names the host operating system the way the Python runtime does
//! (`platform.system()`) and knows the fallback suffix of a compiled
//! extension module.

use std::env;

/// Operating system name shown in the menu banner
///
/// Examples: "Linux", "Darwin", "Windows"
#[must_use]
pub fn os_name() -> String {
    system_name(env::consts::OS)
}

fn system_name(os: &str) -> String {
    match os {
        "linux" => "Linux".to_string(),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        "openbsd" => "OpenBSD".to_string(),
        "netbsd" => "NetBSD".to_string(),
        other => {
            let mut chars = other.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        }
    }
}

/// Extension-module suffix used when the interpreter does not report one
///
/// Python loads `.pyd` on Windows and `.so` everywhere else (including macOS).
#[must_use]
pub const fn default_extension_suffix() -> &'static str {
    if cfg!(windows) { ".pyd" } else { ".so" }
}

/// Check whether a file name looks like a compiled extension module
#[must_use]
pub fn is_extension_artifact(file_name: &str) -> bool {
    file_name.ends_with(".so") || file_name.ends_with(".pyd")
}
