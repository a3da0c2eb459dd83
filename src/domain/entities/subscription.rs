//! Local view of the user's sensor subscriptions.

use std::collections::BTreeSet;

use super::sensor::SensorId;

/// Sensor ids the signed-in user is subscribed to.
///
/// Populated from the backend when a screen mounts and updated only after the
/// backend confirms a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionSet {
    sensors: BTreeSet<SensorId>,
}

impl SubscriptionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sensor. Returns `false` if it was already present.
    pub fn subscribe(&mut self, id: SensorId) -> bool {
        self.sensors.insert(id)
    }

    /// Removes a sensor. Returns `false` if it was not present.
    pub fn unsubscribe(&mut self, id: &SensorId) -> bool {
        self.sensors.remove(id)
    }

    /// Whether the sensor is subscribed.
    #[must_use]
    pub fn contains(&self, id: &SensorId) -> bool {
        self.sensors.contains(id)
    }

    /// Number of subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Whether there are no subscriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Iterates subscribed ids in order.
    pub fn iter(&self) -> impl Iterator<Item = &SensorId> {
        self.sensors.iter()
    }
}

impl FromIterator<SensorId> for SubscriptionSet {
    fn from_iter<T: IntoIterator<Item = SensorId>>(iter: T) -> Self {
        Self {
            sensors: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_then_unsubscribe_restores_set() {
        let mut set: SubscriptionSet = [SensorId::new("a")].into_iter().collect();
        let before = set.clone();

        assert!(set.subscribe(SensorId::new("b")));
        assert!(set.unsubscribe(&SensorId::new("b")));

        assert_eq!(set, before);
    }

    #[test]
    fn test_duplicate_subscribe_is_noop() {
        let mut set = SubscriptionSet::new();

        assert!(set.subscribe(SensorId::new("a")));
        assert!(!set.subscribe(SensorId::new("a")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unsubscribe_missing() {
        let mut set = SubscriptionSet::new();
        assert!(!set.unsubscribe(&SensorId::new("a")));
        assert!(set.is_empty());
    }
}
