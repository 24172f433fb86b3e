//! List command
//!
//! Print the detected pybind11 modules without building anything

use super::Session;
use crate::GlobalArgs;
use anyhow::Result;
use genbuild::discover_modules;

/// List detected modules in build order
pub(crate) fn run(args: &GlobalArgs) -> Result<()> {
    let session = Session::load(args)?;
    let text = session.locale;

    for root in session.layout.existing_generator_roots() {
        println!("{}", text.scanning(root.display()));
    }

    let modules = discover_modules(
        &session.layout.generator_roots,
        &session.config.source_extension(),
    );
    if modules.is_empty() {
        println!("{}", text.no_generators());
        return Ok(());
    }

    println!("{}", text.detected(modules.len()));
    for (idx, spec) in modules.iter().enumerate() {
        println!(
            "{:>2}. {:<25} ({})",
            idx + 1,
            spec.name,
            spec.source_file_name()
        );
    }

    Ok(())
}
