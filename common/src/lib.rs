// common/src/lib.rs
pub mod api;
pub mod format;
pub mod models;

// Re-export commonly used items
pub use api::*;
pub use format::*;
pub use models::*;
