//! Plumbing commands
//!
//! - `hash-object`: Compute an object id and optionally store the content
//! - `cat-file`: Print the raw content of a stored object
//! - `ls-files`: List the staging index
//! - `ls-tree`: List the entries of a tree (or of a commit's tree)

pub mod cat_file;
pub mod hash_object;
pub mod ls_files;
pub mod ls_tree;
