pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;

pub use client::{ApiClient, ApiError, ClientError};
pub use error::BindingError;
