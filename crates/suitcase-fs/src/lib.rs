//! Filesystem collaborator for the Suitcase document store
//!
//! Provides the [`Filesystem`] capability set the store consumes, a
//! disk-backed [`LocalFilesystem`], an in-memory [`MemoryFilesystem`],
//! and the path and I/O helpers they share.

pub mod error;
pub mod filesystem;
pub mod io;
pub mod local;
pub mod memory;
pub mod path;

pub use error::{Error, Result};
pub use filesystem::{ContentEntry, Filesystem};
pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
pub use path::NormalizedPath;
