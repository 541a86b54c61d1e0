//! Command implementations
//!
//! Commands are split the way git splits them:
//!
//! - `plumbing`: Low-level commands that expose objects and the index directly
//! - `porcelain`: User-facing commands for the everyday workflow (init, add, commit, log, branch)
//!
//! Every command is an `impl Repository` block writing its output to the repository writer.

pub mod plumbing;
pub mod porcelain;
