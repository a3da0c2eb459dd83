//! Domain entity definitions.

mod aqi;
mod notification;
mod sensor;
mod subscription;
mod token;

pub use aqi::{AqiColor, AqiLevel};
pub use notification::{Notification, NotificationFeed};
pub use sensor::{Coordinates, ParticulateMatter, Sensor, SensorId, SensorReading};
pub use subscription::SubscriptionSet;
pub use token::AuthToken;
