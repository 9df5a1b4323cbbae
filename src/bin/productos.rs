//! Interactive product inventory backed by `productos.json`.
//!
//! Reads menu selections and field values line by line from stdin and writes
//! prompts and status lines to stdout. Diagnostics go to stderr through
//! `tracing`, filtered by `RUST_LOG` (default `warn`).

use anyhow::{Context, Result};
use productos::{Config, Console, Invocation, Shell};
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    init_tracing();

    let config = match Config::from_args(env::args_os().skip(1)) {
        Ok(Invocation::Run(config)) => config,
        Ok(Invocation::Help) => usage(0),
        Err(err) => {
            eprintln!("{err:#}");
            usage(1);
        }
    };
    tracing::debug!(path = %config.data_path.display(), "starting session");

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut shell = Shell::open(config, console).context("failed to open inventory")?;
    shell.run()?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: productos [DATA_FILE]\n\nRuns the interactive product menu. DATA_FILE defaults to productos.json in the\ncurrent directory; it is read at start and rewritten when option 5 (Salir) is chosen."
    );
    std::process::exit(code);
}
