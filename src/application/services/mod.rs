//! Application services shared by use cases and screens.

pub mod cancellation;
pub mod input_sanitizer;
pub mod session_context;

pub use cancellation::{CancellationScope, ScreenLifetime};
pub use input_sanitizer::{sanitize_email, sanitize_input};
pub use session_context::SessionContext;
