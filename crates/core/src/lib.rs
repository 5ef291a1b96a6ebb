//! # TutorHub Core
//!
//! Domain types and the recurring session generator shared by the database
//! and API crates.

pub mod errors;
pub mod models;
pub mod scheduler;
pub mod settings;
pub mod store;
