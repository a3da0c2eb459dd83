//! [`AirQualityPort`] over the HTTP backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::client::{ApiClient, FetchOptions};
use super::dto::{
    ErrorResponse, LoginBody, NotificationResponse, PushTokenBody, ReadingResponse, RegisterBody,
    SensorResponse, SubscribedSensorResponse, TokenResponse, parse_timestamp,
};
use crate::domain::entities::{
    AuthToken, Coordinates, Notification, ParticulateMatter, Sensor, SensorId, SensorReading,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AirQualityPort, Credentials, Registration};

/// Backend client implementing the air-quality port.
pub struct HttpAirQualityClient {
    api: Arc<ApiClient>,
}

impl HttpAirQualityClient {
    /// Wraps the authenticated client.
    #[must_use]
    pub const fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    async fn body(response: Response) -> Result<Vec<u8>, ApiError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::network(format!("failed to read response: {e}")))
    }

    /// Turns a non-success response into [`ApiError::Status`], keeping the
    /// backend's `message` when there is one.
    async fn error_from(response: Response) -> ApiError {
        let status = response.status();
        let message = match Self::body(response).await {
            Ok(body) => serde_json::from_slice::<ErrorResponse>(&body)
                .ok()
                .and_then(ErrorResponse::into_message),
            Err(_) => None,
        };

        debug!(status = status.as_u16(), message = ?message, "Request rejected");
        ApiError::status(status.as_u16(), message)
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = Self::body(response).await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse response");
            ApiError::decode(e.to_string())
        })
    }

    /// Decodes a list body. A body that is not an array yields nothing and
    /// items that do not decode are skipped.
    async fn read_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>, ApiError> {
        let response = Self::ensure_success(response).await?;
        let body = Self::body(response).await?;
        Ok(decode_list(&body))
    }

    async fn send(&self, target: &str, options: FetchOptions) -> Result<Response, ApiError> {
        self.api.fetch(target, options).await
    }
}

pub(crate) fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Vec<T> {
    let items = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(serde_json::Value::Array(items)) => items,
        Ok(other) => {
            warn!(kind = json_kind(&other), "Expected a list, treating as empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "List body is not JSON, treating as empty");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed list item");
                None
            }
        })
        .collect()
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn sensor_from(response: SensorResponse) -> Sensor {
    let id = SensorId::new(String::from(response.id));
    let coordinates = Coordinates {
        latitude: response.latitude.unwrap_or_default(),
        longitude: response.longitude.unwrap_or_default(),
    };
    Sensor::new(
        id,
        response.title.unwrap_or_default(),
        response.location.unwrap_or_default(),
        coordinates,
    )
}

fn reading_from(requested: &SensorId, response: ReadingResponse) -> SensorReading {
    let sensor_id = response
        .sensor_id
        .map_or_else(|| requested.clone(), |id| SensorId::new(String::from(id)));
    let particulates = ParticulateMatter {
        pm1: response.pm1,
        pm25: response.pm25,
        pm10: response.pm10,
    };

    SensorReading::new(sensor_id, particulates, response.aqi_level.as_deref())
        .with_climate(response.temperature, response.humidity)
        .recorded_at(parse_timestamp(response.date_time.as_deref()))
}

fn notification_from(response: NotificationResponse) -> Notification {
    Notification::new(String::from(response.id), response.message)
        .created_at(parse_timestamp(response.date_time.as_deref()))
        .read(response.is_read)
}

#[async_trait]
impl AirQualityPort for HttpAirQualityClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let options = FetchOptions::post().json(&LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        })?;
        let response = self.send("/users/login", options).await?;
        let body: TokenResponse = Self::read_json(response).await?;

        body.access_token
            .and_then(AuthToken::new)
            .ok_or_else(|| ApiError::decode("response has no access_token"))
    }

    async fn register(&self, registration: &Registration) -> Result<Option<AuthToken>, ApiError> {
        let options = FetchOptions::post().json(&RegisterBody {
            email: &registration.credentials.email,
            password: &registration.credentials.password,
            username: registration.username.as_deref(),
        })?;
        let response = self.send("/users/register", options).await?;
        let response = Self::ensure_success(response).await?;
        let body = Self::body(response).await?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let token = match serde_json::from_slice::<TokenResponse>(&body) {
            Ok(parsed) => parsed.access_token.and_then(AuthToken::new),
            Err(e) => {
                debug!(error = %e, "Registration response carries no credential");
                None
            }
        };
        Ok(token)
    }

    async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let options = FetchOptions::post().query("token", token);
        let response = self.send("/user/verify-email", options).await?;
        Self::ensure_success(response).await.map(drop)
    }

    async fn list_sensors(&self) -> Result<Vec<Sensor>, ApiError> {
        let response = self.send("/sensors", FetchOptions::get()).await?;
        let sensors: Vec<SensorResponse> = Self::read_list(response).await?;
        Ok(sensors.into_iter().map(sensor_from).collect())
    }

    async fn latest_reading(&self, sensor_id: &SensorId) -> Result<SensorReading, ApiError> {
        let url = self
            .api
            .endpoint(&["sensor-readings", sensor_id.as_str(), "latest-reading"])?;
        let response = self.send(url.as_str(), FetchOptions::get()).await?;
        let reading: ReadingResponse = Self::read_json(response).await?;
        Ok(reading_from(sensor_id, reading))
    }

    async fn subscribed_sensors(&self) -> Result<Vec<SensorId>, ApiError> {
        let response = self
            .send("/subscriptions/subscribed-sensors", FetchOptions::get())
            .await?;
        let items: Vec<SubscribedSensorResponse> = Self::read_list(response).await?;
        Ok(items
            .into_iter()
            .map(|item| SensorId::new(String::from(item.sensor_id)))
            .collect())
    }

    async fn subscribe(&self, sensor_id: &SensorId) -> Result<(), ApiError> {
        let url = self
            .api
            .endpoint(&["subscriptions", "subscribe", sensor_id.as_str()])?;
        let response = self.send(url.as_str(), FetchOptions::post()).await?;
        Self::ensure_success(response).await.map(drop)
    }

    async fn unsubscribe(&self, sensor_id: &SensorId) -> Result<(), ApiError> {
        let url = self
            .api
            .endpoint(&["subscriptions", "unsubscribe", sensor_id.as_str()])?;
        let response = self.send(url.as_str(), FetchOptions::delete()).await?;
        Self::ensure_success(response).await.map(drop)
    }

    async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        let response = self.send("/notifications", FetchOptions::get()).await?;
        let items: Vec<NotificationResponse> = Self::read_list(response).await?;
        Ok(items.into_iter().map(notification_from).collect())
    }

    async fn register_push_token(&self, push_token: &str) -> Result<(), ApiError> {
        let options = FetchOptions::post().json(&PushTokenBody { token: push_token })?;
        let response = self.send("/users/expo-token", options).await?;
        Self::ensure_success(response).await.map(drop)
    }
}
