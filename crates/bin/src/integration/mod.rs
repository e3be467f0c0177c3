//! Integration module for the CLI.
//!
//! Resolves run settings from flags and an optional config file, then wires
//! the CSV source, the index engine and the progress display together.

pub(crate) mod pipeline;
pub(crate) mod settings;
