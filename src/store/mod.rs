// Local persistence module.
// Keeps the last fetched owner/repository between sessions.

pub mod kv;
pub mod paths;

#[cfg(test)]
pub use kv::MemoryStore;
pub use kv::{FileStore, KeyValueStore, OWNER_KEY, REPO_KEY};
pub use paths::{log_path, store_path};
