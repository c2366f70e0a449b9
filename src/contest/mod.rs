// Public API - what other modules can use
pub use handlers::{create_contest, get_contest, join_contest, leave_contest, list_contests};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
