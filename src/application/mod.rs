//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Shared services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse, RegisterOutcome, RegisterRequest};
pub use services::{CancellationScope, ScreenLifetime, SessionContext};
pub use use_cases::{
    LoadNotificationsUseCase, LoginUseCase, RegisterUseCase, ResolveSessionUseCase,
    SensorReadingsUseCase, SubscriptionUseCase, VerifyEmailUseCase,
};
