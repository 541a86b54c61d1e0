#[path = "../common/mod.rs"]
mod common;

mod add_files_to_index;
mod concurrent_add_operations_keep_every_entry;
