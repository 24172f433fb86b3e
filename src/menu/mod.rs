//! Interactive terminal menu
//!
//! Each round rediscovers the generators, shows a banner and the main options,
//! and acts on one line of input. Build failures are reported and the menu
//! comes back; only "0" or end of input leaves the loop.

pub mod locale;
pub mod selection;

pub use locale::Locale;
pub use selection::{RejectReason, RejectedToken, Selection, parse_selection};

use crate::extensions::{ExtensionBuilder, ExtensionCompiler, ModuleSpec, discover_modules};
use crate::paths::ProjectLayout;
use anyhow::Result;
use std::io::{BufRead, Write};

/// The interactive builder
///
/// Generic over its input and output so the whole dialogue can run against
/// in-memory buffers.
#[derive(Debug)]
pub struct Menu<C, R, W> {
    builder: ExtensionBuilder<C>,
    layout: ProjectLayout,
    source_extension: String,
    locale: Locale,
    input: R,
    output: W,
}

impl<C: ExtensionCompiler, R: BufRead, W: Write> Menu<C, R, W> {
    /// Create a menu over a project layout
    pub fn new(
        builder: ExtensionBuilder<C>,
        layout: ProjectLayout,
        locale: Locale,
        input: R,
        output: W,
    ) -> Self {
        Self {
            builder,
            layout,
            source_extension: crate::DEFAULT_SOURCE_EXTENSION.to_string(),
            locale,
            input,
            output,
        }
    }

    /// Scan for a different source extension (without the dot)
    #[must_use]
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        let text = self.locale;

        loop {
            let modules = discover_modules(&self.layout.generator_roots, &self.source_extension);
            self.print_banner(&modules)?;
            for line in text.main_options() {
                writeln!(self.output, "{line}")?;
            }

            let Some(choice) = self.read_line(text.main_prompt())? else {
                return Ok(());
            };

            let selected = match choice.trim() {
                "0" => {
                    writeln!(self.output, "{}", text.goodbye())?;
                    return Ok(());
                }
                "1" => modules,
                "2" => match self.prompt_selection(&modules)? {
                    Some(selected) => selected,
                    None => return Ok(()),
                },
                "3" => {
                    if self.prompt_selection(&modules)?.is_none()
                        || self.read_line(text.back_to_main_menu())?.is_none()
                    {
                        return Ok(());
                    }
                    continue;
                }
                _ => {
                    writeln!(self.output, "{}", text.invalid_choice())?;
                    continue;
                }
            };

            if selected.is_empty() {
                writeln!(self.output, "{}", text.none_selected())?;
                continue;
            }

            if !self.run_build(&selected)? {
                return Ok(());
            }
        }
    }

    fn print_banner(&mut self, modules: &[ModuleSpec]) -> Result<()> {
        let text = self.locale;
        let rule = "=".repeat(60);

        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "{}", text.banner_title())?;
        writeln!(self.output, "{rule}")?;
        writeln!(
            self.output,
            "{}",
            text.operating_system(&crate::platform::os_name())
        )?;
        for root in self.layout.existing_generator_roots() {
            writeln!(self.output, "{}", text.scanning(root.display()))?;
        }
        writeln!(self.output, "{}", text.detected(modules.len()))?;
        Ok(())
    }

    /// Show the numbered list and read a selection
    ///
    /// `None` means input ended.
    fn prompt_selection(&mut self, modules: &[ModuleSpec]) -> Result<Option<Vec<ModuleSpec>>> {
        let text = self.locale;

        if modules.is_empty() {
            writeln!(self.output, "{}", text.no_generators())?;
            return Ok(Some(Vec::new()));
        }

        for (idx, spec) in modules.iter().enumerate() {
            writeln!(
                self.output,
                "{:>2}. {:<25} ({})",
                idx + 1,
                spec.name,
                spec.source_file_name()
            )?;
        }
        for line in text.picker_options() {
            writeln!(self.output, "{line}")?;
        }

        let Some(answer) = self.read_line(text.picker_prompt())? else {
            return Ok(None);
        };

        let selection = parse_selection(&answer, modules.len());
        for rejected in &selection.rejected {
            let warning = match rejected.reason {
                RejectReason::Invalid => text.invalid_token(&rejected.token),
                RejectReason::OutOfRange => text.out_of_range(&rejected.token),
            };
            writeln!(self.output, "{warning}")?;
        }

        Ok(Some(selection.pick(modules)))
    }

    /// Build and report; `false` means input ended while waiting for Enter
    fn run_build(&mut self, selected: &[ModuleSpec]) -> Result<bool> {
        let text = self.locale;

        writeln!(self.output, "{}", text.starting_build())?;
        for spec in selected {
            writeln!(self.output, " - {} ({})", spec.name, spec.source.display())?;
        }
        writeln!(self.output)?;
        self.output.flush()?;

        match self.builder.build(selected) {
            Ok(report) => {
                for module in &report.missing {
                    writeln!(self.output, "{}", text.missing_artifact(module))?;
                }
                crate::debug!("build finished in {:?}", report.duration);
                writeln!(
                    self.output,
                    "{}",
                    text.build_complete(self.builder.output_dir().display())
                )?;
            }
            Err(e) => {
                writeln!(self.output, "{}", text.build_failed(format!("{e:#}")))?;
            }
        }

        Ok(self.read_line(text.back_to_menu())?.is_some())
    }

    /// Print a prompt and read one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
