//! Use case implementations.

mod load_notifications_use_case;
mod login_use_case;
mod register_use_case;
mod resolve_session_use_case;
mod sensor_readings_use_case;
mod subscription_use_case;
mod verify_email_use_case;

pub use load_notifications_use_case::LoadNotificationsUseCase;
pub use login_use_case::LoginUseCase;
pub use register_use_case::RegisterUseCase;
pub use resolve_session_use_case::ResolveSessionUseCase;
pub use sensor_readings_use_case::{SensorMap, SensorOverview, SensorReadingsUseCase};
pub use subscription_use_case::SubscriptionUseCase;
pub use verify_email_use_case::VerifyEmailUseCase;
