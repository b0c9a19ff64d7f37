//! REST client for the clinic operations API.
//!
//! Every call carries the same header set, an optional bearer token and the
//! session cookies. Failures are normalized into [`ApiError`]; there are no
//! retries and no client-side timeout.

pub mod endpoints;
pub mod error;
pub mod http;
pub mod token;

pub use error::{ApiError, ApiErrorKind, ClientError};
pub use http::ApiClient;
pub use token::{MemoryTokenStore, TokenStore};
