//! Build-ext command
//!
//! Build every pybind11 source of one generator directory in a single batch

use super::Session;
use crate::GlobalArgs;
use anyhow::{Result, bail};
use genbuild::{ExtensionBuilder, METADATA, discover_extensions};
use std::path::Path;

/// Build the generator package
pub(crate) fn run(args: &GlobalArgs, dir: Option<&Path>, inplace: bool) -> Result<()> {
    let session = Session::load(args)?;
    let text = session.locale;

    let dir = dir.map_or_else(|| session.package_dir(), |dir| session.layout.resolve(dir));
    let targets = discover_extensions(&dir, &session.config.source_extension())?;

    if targets.is_empty() {
        println!("{}", text.nothing_to_build());
        return Ok(());
    }

    let compiler = session.compiler()?;
    let mut builder = ExtensionBuilder::new(compiler, &session.layout, session.config.cxx_std())
        .with_progress(true);
    if inplace {
        builder = builder.with_output_dir(&dir);
    }

    println!(
        "{} {}: {} extension(s) with {}",
        METADATA.name,
        METADATA.version,
        targets.len(),
        builder.compiler_name()
    );
    for target in &targets {
        println!(" - {}", target.name);
    }

    let report = builder.build_targets(&targets)?;

    for path in &report.copied {
        println!("{}", path.display());
    }
    for module in &report.missing {
        eprintln!("{}", text.missing_artifact(module));
    }

    if !report.is_complete() {
        bail!(
            "{} of {} module(s) produced no shared library",
            report.missing.len(),
            targets.len()
        );
    }

    println!("{}", text.build_complete(builder.output_dir().display()));
    Ok(())
}
