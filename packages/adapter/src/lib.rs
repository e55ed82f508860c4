//! # jsonfs-adapter
//!
//! Translates filesystem requests into tree store calls.
//!
//! A kernel filesystem host (FUSE or similar) calls into [`JsonFs`] one
//! request at a time. Every request resolves its path afresh, so no state is
//! kept per open file: handles are only a counter.
//!
//! ## Mapping
//!
//! ```text
//! JSON object         -> directory
//! any other value     -> file whose content is the value's rendering
//! ```
//!
//! Failures are [`FsError`]s; [`FsError::errno`] gives the code to hand back
//! to the kernel.

mod attr;
mod error;
mod fs;

pub use attr::{AttrPolicy, FileAttr, FileKind};
pub use error::FsError;
pub use fs::{Handle, JsonFs};
