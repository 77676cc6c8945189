//! Database operations module.
//!
//! The target record store and result store, backed by SQLite via sqlx. All
//! writes are individual, immediately visible transactions; the engine never
//! caches status across phases.

pub mod pool;
pub mod result;
pub mod schema;
pub mod target;

// Re-export commonly used items
pub use pool::{init_db_pool_with_path, init_memory_pool};
pub use result::{insert_result, list_results};
pub use schema::init_schema;
pub use target::{
    claim_target, create_target, delete_target, get_target, list_targets, request_stop,
    set_target_status, update_target_address,
};
