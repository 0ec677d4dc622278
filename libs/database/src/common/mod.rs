//! Common utilities shared across all database implementations

pub mod context;
pub mod error;
pub mod retry;

pub use context::{ContextError, RequestContext};
pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry, retry_with_backoff};
