//! Backend request and response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct PushTokenBody<'a> {
    pub token: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default, alias = "accessToken")]
    pub access_token: Option<String>,
}

/// Ids arrive as strings or numbers depending on the backend version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(text) => text,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorResponse {
    #[serde(alias = "sensorId", alias = "_id")]
    pub id: WireId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResponse {
    #[serde(default)]
    pub sensor_id: Option<WireId>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub pm1: Option<f64>,
    #[serde(default, alias = "pm2_5")]
    pub pm25: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(default, alias = "aqi")]
    pub aqi_level: Option<String>,
    #[serde(default)]
    pub date_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribedSensorResponse {
    pub sensor_id: WireId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: WireId,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub is_read: bool,
}

/// `message` is a string, or a list of strings for validation failures.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<ErrorMessage>,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        let text = match self.message? {
            ErrorMessage::One(text) => text,
            ErrorMessage::Many(lines) => lines.join(", "),
        };
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Parses an RFC 3339 timestamp, ignoring anything else.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(at) => Some(at.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "Ignoring unparseable timestamp");
            None
        }
    }
}
