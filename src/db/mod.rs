//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `traits.rs`: the `ReminderStore` seam used by the services
//! - `actor.rs`: the actor that owns the pool

pub mod actor;
pub mod models;
pub mod schema;
pub mod traits;

pub use models::{DbReminder, ReminderCreate, ReminderStatus};
pub use schema::SQLITE_INIT;
pub use traits::ReminderStore;

pub use actor::{DbActorHandle, spawn};
