//! genbuild command-line interface
//!
//! Interactive terminal UI for building pybind11 generator modules

use clap::{Args, Parser, Subcommand};
use genbuild::{Backend, Locale};
use std::path::PathBuf;
use std::process;

mod commands;

const ABOUT: &str = "Interactive terminal UI for building pybind11 generator modules.

The tool scans generator directories for C++ sources that expose a
`PYBIND11_MODULE` definition and compiles them. It relies on setuptools and
pybind11, so builds work across Linux, macOS, and Windows as long as a
suitable C++17 compiler is available to the active Python environment.";

/// Display an error with optional backtrace information
fn display_error(err: &anyhow::Error, backtrace_enabled: bool) {
    eprintln!("error: {err}");

    // Show error chain
    let mut source = err.source();
    while let Some(err) = source {
        eprintln!("caused by: {err}");
        source = err.source();
    }

    if backtrace_enabled {
        let backtrace = err.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            eprintln!("\nBacktrace:");
            eprintln!("{backtrace}");
        }
    }
}

#[derive(Parser)]
#[command(name = "genbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = ABOUT, long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// Project root containing `generators/` and `testlib/` (default: current directory)
    #[arg(long, global = true, env = "GENBUILD_ROOT")]
    pub(crate) root: Option<PathBuf>,

    /// Menu language
    #[arg(long, global = true, value_enum)]
    pub(crate) lang: Option<Locale>,

    /// Path to a config file (default: `.genbuild.toml`, then the user config)
    #[arg(long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Build backend
    #[arg(long, global = true, value_enum)]
    pub(crate) backend: Option<Backend>,

    /// Python interpreter that has setuptools and pybind11
    #[arg(long, global = true)]
    pub(crate) python: Option<String>,

    /// Show compiler output even when the build succeeds
    #[arg(long, global = true)]
    pub(crate) verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Show backtraces on errors
    #[arg(long, global = true)]
    pub(crate) backtrace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive builder (default)
    Menu,

    /// List detected pybind11 modules and exit
    List,

    /// Build every generator of one directory, like `setup.py build_ext`
    BuildExt {
        /// Generator directory (default: `<root>/generators`)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Place compiled modules next to their sources instead of the output directory
        #[arg(long)]
        inplace: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    genbuild::init_debug(cli.global.debug);
    let backtrace = cli.global.backtrace;

    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => commands::menu::run(&cli.global),
        Commands::List => commands::list::run(&cli.global),
        Commands::BuildExt { dir, inplace } => {
            commands::build_ext::run(&cli.global, dir.as_deref(), inplace)
        }
    };

    if let Err(e) = result {
        display_error(&e, backtrace);
        process::exit(1);
    }
}
