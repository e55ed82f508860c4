//! Command-line arguments and the configuration built from them.
//!
//! Every flag can also be set through a `JSONFS_*` environment variable.

use std::path::PathBuf;

use clap::Parser;

use jsonfs_adapter::{AttrPolicy, FsError, JsonFs};
use jsonfs_tree_store::{JsonFileStorage, TreeStore, DEFAULT_INDENT};

use crate::commands::Command;

/// jsonfs - browse and edit a JSON document as a filesystem
#[derive(Parser, Debug)]
#[command(name = "jsonfs")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON document to operate on
    #[arg(short, long, env = "JSONFS_DOCUMENT", default_value = "data.json")]
    pub document: PathBuf,

    /// Spaces per indentation level when the document is rewritten
    #[arg(long, env = "JSONFS_INDENT", default_value_t = DEFAULT_INDENT)]
    pub indent: usize,

    /// Permission bits reported for directories, in octal
    #[arg(long, env = "JSONFS_DIR_MODE", value_parser = parse_mode)]
    pub dir_mode: Option<u32>,

    /// Permission bits reported for files, in octal
    #[arg(long, env = "JSONFS_FILE_MODE", value_parser = parse_mode)]
    pub file_mode: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|error| format!("invalid octal mode '{}': {}", s, error))?;
    if mode > 0o7777 {
        return Err(format!("mode '{}' has bits outside 0o7777", s));
    }
    Ok(mode)
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub document: PathBuf,
    pub indent: usize,
    pub policy: AttrPolicy,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let mut policy = AttrPolicy::current_process();
        if let Some(mode) = args.dir_mode {
            policy.dir_perm = mode;
        }
        if let Some(mode) = args.file_mode {
            policy.file_perm = mode;
        }

        Config {
            document: args.document.clone(),
            indent: args.indent,
            policy,
        }
    }

    /// Load the configured document.
    pub fn open(&self) -> Result<JsonFs<JsonFileStorage>, FsError> {
        let storage = JsonFileStorage::new(&self.document);
        let store = TreeStore::open_with_indent(storage, self.indent)?;
        Ok(JsonFs::new(store, self.policy.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_octal_modes() {
        assert_eq!(parse_mode("755"), Ok(0o755));
        assert_eq!(parse_mode("0o644"), Ok(0o644));
        assert_eq!(parse_mode("0755"), Ok(0o755));
        assert!(parse_mode("9").is_err());
        assert!(parse_mode("17777").is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["jsonfs", "ls", "/"]).unwrap();
        let config = Config::from_args(&args);
        assert_eq!(config.indent, DEFAULT_INDENT);
        assert_eq!(config.policy.dir_perm, AttrPolicy::DEFAULT_DIR_PERM);
        assert_eq!(config.policy.file_perm, AttrPolicy::DEFAULT_FILE_PERM);
    }

    #[test]
    fn flags_override_policy() {
        let args = Args::try_parse_from([
            "jsonfs",
            "--document",
            "/tmp/doc.json",
            "--indent",
            "2",
            "--dir-mode",
            "755",
            "--file-mode",
            "0o600",
            "stat",
            "/",
        ])
        .unwrap();
        let config = Config::from_args(&args);
        assert_eq!(config.document, PathBuf::from("/tmp/doc.json"));
        assert_eq!(config.indent, 2);
        assert_eq!(config.policy.dir_perm, 0o755);
        assert_eq!(config.policy.file_perm, 0o600);
    }
}
