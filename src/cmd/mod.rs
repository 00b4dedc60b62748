//! Command handlers.
//!
//! - `export`: scroll an index into an archive file
//! - `import`: bulk-load an archive into an index

pub mod export;
pub mod import;
