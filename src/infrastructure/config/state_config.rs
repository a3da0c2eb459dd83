//! Local state persisted in `state.toml`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Client-side state kept between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Notification ids read on this device.
    #[serde(default)]
    pub read_notifications: BTreeSet<String>,
}
