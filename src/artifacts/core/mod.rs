//! Shared utilities

pub mod lock;
