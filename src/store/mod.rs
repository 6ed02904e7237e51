pub mod base;
pub mod config_store;
pub mod json_file;

// Re-export the primary store items so code outside can do
// "use crate::store::{ConfigStore, create_store};"
pub use base::{create_store, Backend};
pub use config_store::ConfigStore;
pub use json_file::JsonFileBackend;
