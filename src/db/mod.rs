//! Database module: models and schema for the clinic tables.
//!
//! Layout:
//! - `models.rs`: row structs, insert shapes and their validation
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: `ClinicStorage`, the CRUD surface over both tables

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Lead, LeadInsert, LeadPatch, NewLead, NewUser, User, UserInsert, ValidationError};
pub use schema::SQLITE_INIT;
pub use sqlite::{ClinicStorage, SqlitePool};
