pub mod base;
pub mod memory_store;
pub mod mongodb_store;
pub mod no_store;
pub mod supabase_store;

// Re-export the primary Store items so code outside can do
// "use crate::store::{Store, create_store};"
pub use base::{create_store, Store};
