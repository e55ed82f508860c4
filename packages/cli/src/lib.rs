//! Command-line front end for jsonfs.
//!
//! Loads the configured document, runs a single filesystem operation against
//! it and reports the result. Mutating commands rewrite the document before
//! returning.

pub mod commands;
pub mod config;

pub use commands::{execute, Command};
pub use config::{Args, Config};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Fs(#[from] jsonfs_adapter::FsError),
}

/// Run the command described by `args`.
pub fn run(args: &Args) -> Result<String, CliError> {
    let config = Config::from_args(args);
    log::debug!("Using document {}", config.document.display());

    let mut fs = config.open()?;
    execute(&mut fs, &args.command)
}
