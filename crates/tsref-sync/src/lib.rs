//! Synchronization engine for Reference Manager
//!
//! Turns the project graph into replacement `paths` and `references`
//! content, splices it into each configuration file's located spans, and
//! writes back only when the text actually changed.

pub mod engine;
pub mod entries;
pub mod error;
pub mod splice;

pub use engine::{SyncEngine, SyncOptions, SyncReport};
pub use entries::{PathEntry, ReferenceEntry, synthesize_paths, synthesize_references};
pub use error::{Error, Result};
pub use splice::{BLOCK_END, BLOCK_START, SpliceOp, apply_splices};
