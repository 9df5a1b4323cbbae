//! Session configuration.
//!
//! The only setting is the data file location. It defaults to
//! [`DEFAULT_DATA_FILE`] in the working directory and can be replaced by a
//! single positional argument.

use crate::repository::DEFAULT_DATA_FILE;
use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
}

/// What the command line asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(Config),
    Help,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: path.into(),
        }
    }

    /// Parse arguments that follow the program name.
    pub fn from_args<I>(args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();
        let Some(first) = args.next() else {
            return Ok(Invocation::Run(Self::default()));
        };

        let first_str = first
            .to_str()
            .with_context(|| "Invalid UTF-8 in argument")?;
        if matches!(first_str, "--help" | "-h") {
            return Ok(Invocation::Help);
        }
        if first_str.starts_with('-') {
            bail!("unknown option '{first_str}'");
        }
        if let Some(extra) = args.next() {
            bail!("unexpected argument '{}'", extra.to_string_lossy());
        }
        Ok(Invocation::Run(Self::with_data_path(first)))
    }
}
