//! twig: a minimal content-addressable version control core
//!
//! The crate is split the same way the command-line tool reads:
//!
//! - `artifacts`: plain data types and codecs (object ids, trees, commits, index entries)
//! - `areas`: on-disk components (object database, index, refs, commit graph, workspace)
//! - `commands`: the user-facing commands, implemented on [`areas::repository::Repository`]
//! - `errors`: the error taxonomy shared by every area

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
