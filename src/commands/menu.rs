//! Menu command
//!
//! Run the interactive builder on stdin/stdout

use super::Session;
use crate::GlobalArgs;
use anyhow::Result;
use genbuild::{ExtensionBuilder, Menu};
use std::io;

/// Run the interactive builder until the user exits
pub(crate) fn run(args: &GlobalArgs) -> Result<()> {
    let session = Session::load(args)?;
    let compiler = session.compiler()?;

    let builder = ExtensionBuilder::new(compiler, &session.layout, session.config.cxx_std())
        .with_progress(true);

    let stdin = io::stdin();
    let mut menu = Menu::new(
        builder,
        session.layout,
        session.locale,
        stdin.lock(),
        io::stdout(),
    )
    .with_source_extension(session.config.source_extension());

    menu.run()
}
