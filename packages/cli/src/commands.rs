//! CLI commands, one per filesystem operation.

use clap::Subcommand;

use jsonfs_adapter::{FileKind, JsonFs};
use jsonfs_tree_store::Storage;

use crate::CliError;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the attributes of an entry
    Stat { path: String },

    /// List a directory
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Print the content of a file
    Cat {
        path: String,
        /// Maximum number of bytes to print
        #[arg(long)]
        size: Option<usize>,
        /// Byte offset to start at
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Write text to a file; offset 0 replaces, anything else appends
    Write {
        path: String,
        data: String,
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Create an empty file
    Create { path: String },

    /// Cut a file down to LENGTH bytes
    Truncate { path: String, length: u64 },

    /// Remove a file
    Rm { path: String },

    /// Remove a directory
    Rmdir { path: String },

    /// Create a directory
    Mkdir { path: String },

    /// Print the whole document
    Dump,
}

/// Run `command` against `fs` and return what should be printed.
pub fn execute<S: Storage>(fs: &mut JsonFs<S>, command: &Command) -> Result<String, CliError> {
    log::debug!("Executing {:?}", command);
    match command {
        Command::Stat { path } => {
            let attr = fs.stat(path)?;
            let kind = match attr.kind {
                FileKind::Directory => "directory",
                FileKind::File => "file",
            };
            Ok(format!(
                "kind: {}\nmode: {:o}\nnlink: {}\nsize: {}\nuid: {}\ngid: {}",
                kind, attr.mode, attr.nlink, attr.size, attr.uid, attr.gid
            ))
        }
        Command::Ls { path } => Ok(fs.list(path)?.join("\n")),
        Command::Cat { path, size, offset } => {
            let bytes = fs.read(path, size.unwrap_or(usize::MAX), *offset)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Command::Write { path, data, offset } => {
            let written = fs.write(path, data.as_bytes(), *offset)?;
            Ok(format!("wrote {} bytes to {}", written, path))
        }
        Command::Create { path } => {
            fs.create(path)?;
            Ok(String::new())
        }
        Command::Truncate { path, length } => {
            fs.truncate(path, *length)?;
            Ok(String::new())
        }
        Command::Rm { path } => {
            fs.unlink(path)?;
            Ok(String::new())
        }
        Command::Rmdir { path } => {
            fs.rmdir(path)?;
            Ok(String::new())
        }
        Command::Mkdir { path } => {
            fs.mkdir(path)?;
            Ok(String::new())
        }
        Command::Dump => Ok(String::from_utf8_lossy(&fs.document()?).into_owned()),
    }
}
