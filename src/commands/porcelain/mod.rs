//! Porcelain commands
//!
//! - `init`: Initialize a new repository
//! - `add`: Stage files for commit
//! - `commit`: Record the staged snapshot
//! - `log`: Show commit history of the current branch
//! - `branch`: Create, list, or delete branches

pub mod add;
pub mod branch;
pub mod commit;
pub mod init;
pub mod log;
