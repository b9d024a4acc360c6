//! Sheaf: bundle a source tree into a single annotated text document
//!
//! Walks a source folder, reads each discovered file as UTF-8 text, and
//! appends a tagged block per file to one output document. Per-file read
//! failures become inline error annotations in the document; only failures
//! on the output file itself abort a run.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod error;
pub mod logging;
pub mod walker;
