//! Domain error types.

mod api_error;
mod secret_error;

pub use api_error::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use secret_error::SecretError;
