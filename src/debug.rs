//! Debug logging utilities
//!
//! Debug output is switched on by the global `--debug` flag or by
//! `GENBUILD_DEBUG`. When disabled, the checks are a single atomic load.

use std::process::Command;
use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug mode from the command-line flag
///
/// The environment switch is honored even when the flag is absent.
pub fn init_debug(enabled: bool) {
    let enabled = enabled || crate::env_vars::debug_requested();
    if DEBUG_ENABLED.set(enabled).is_err() {
        debug_log("debug mode was already initialized");
    }
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

/// Print a debug message if debug mode is enabled
pub fn debug_log(message: &str) {
    if is_debug_enabled() {
        eprintln!("[DEBUG] {message}");
    }
}

/// Log the full command line of an external process before it runs
pub fn debug_command(cmd: &Command) {
    if !is_debug_enabled() {
        return;
    }

    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    if let Some(dir) = cmd.get_current_dir() {
        eprintln!("[DEBUG] running in {}: {line}", dir.display());
    } else {
        eprintln!("[DEBUG] running: {line}");
    }
}

/// Macro for convenient debug logging
///
/// Usage: `debug!("message with {}", variable)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}
