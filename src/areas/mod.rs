//! Core repository components
//!
//! - `database`: Content-addressed object store
//! - `index`: Staging area
//! - `refs`: HEAD and branch references
//! - `commit_graph`: Tree/commit creation and history traversal
//! - `repository`: The aggregate handle over all areas
//! - `workspace`: Working directory file system operations

pub mod commit_graph;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
