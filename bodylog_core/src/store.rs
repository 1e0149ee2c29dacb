//! Measurement store: the persisted BodyStats aggregate.
//!
//! Every mutation applies in memory first, then writes the full aggregate
//! back through the gateway under the fixed key. There is no delta
//! persistence and no retry; the last full-object write wins.

use crate::gateway::ObjectGateway;
use crate::types::{BodyPart, BodyStats, Measurement};
use crate::{Error, Result};

/// The fixed storage key for the aggregate. Passed explicitly to the
/// gateway by every operation; never an ambient global.
pub const BODY_STATS_KEY: &str = "bodyStats";

/// Store binding a storage gateway to the aggregate key
pub struct StatsStore<G: ObjectGateway> {
    gateway: G,
    key: String,
}

impl<G: ObjectGateway> StatsStore<G> {
    /// Create a store over a gateway. Callers pass the key; production use
    /// passes [`BODY_STATS_KEY`].
    pub fn new(gateway: G, key: impl Into<String>) -> Self {
        Self {
            gateway,
            key: key.into(),
        }
    }

    /// Load the persisted aggregate.
    ///
    /// Never fails the caller: an absent record and a read failure are
    /// treated identically, both falling back to the default all-empty
    /// aggregate. Corrupt records are not repaired field-by-field.
    pub fn load(&self) -> BodyStats {
        match self.gateway.load_object::<BodyStats>(&self.key) {
            Ok(Some(stats)) => {
                tracing::debug!("Loaded body stats under key {:?}", self.key);
                stats
            }
            Ok(None) => {
                tracing::info!("No record under key {:?}, using defaults", self.key);
                BodyStats::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load body stats under key {:?}: {}. Using defaults.",
                    self.key,
                    e
                );
                BodyStats::default()
            }
        }
    }

    /// Replace the height scalar. Precondition: `value` positive and finite.
    ///
    /// Returns the updated aggregate after persisting it.
    pub fn set_height(&self, stats: &BodyStats, value: f64) -> Result<BodyStats> {
        check_value(value)?;
        let next = stats.with_height(value);
        self.persist(&next)?;
        Ok(next)
    }

    /// Append a weight entry stamped with the current time.
    pub fn add_weight(&self, stats: &BodyStats, value: f64) -> Result<BodyStats> {
        check_value(value)?;
        let next = stats.with_weight(Measurement::now(value));
        self.persist(&next)?;
        Ok(next)
    }

    /// Append a measurement for `part` stamped with the current time.
    pub fn add_measurement(
        &self,
        stats: &BodyStats,
        part: BodyPart,
        value: f64,
    ) -> Result<BodyStats> {
        check_value(value)?;
        let next = stats.with_measurement(part, Measurement::now(value));
        self.persist(&next)?;
        Ok(next)
    }

    /// Write the full aggregate under the fixed key, overwriting any prior
    /// record. Failures are returned, not swallowed; nothing retries.
    pub fn persist(&self, stats: &BodyStats) -> Result<()> {
        self.gateway.save_object(&self.key, stats)?;
        tracing::debug!("Persisted body stats under key {:?}", self.key);
        Ok(())
    }
}

/// Shared precondition: values must be positive finite numbers. The input
/// boundary already filters these; the store still refuses them so no
/// non-positive value can reach a persisted record.
fn check_value(value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidValue(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::JsonFileGateway;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, StatsStore<JsonFileGateway>) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = StatsStore::new(JsonFileGateway::new(temp_dir.path()), BODY_STATS_KEY);
        (temp_dir, store)
    }

    #[test]
    fn test_first_load_yields_default_aggregate() {
        let (_dir, store) = test_store();
        let stats = store.load();
        assert_eq!(stats, BodyStats::default());
    }

    #[test]
    fn test_mutations_persist_full_aggregate() {
        let (_dir, store) = test_store();

        let stats = store.load();
        let stats = store.set_height(&stats, 175.0).unwrap();
        let stats = store.add_weight(&stats, 80.0).unwrap();
        let stats = store
            .add_measurement(&stats, BodyPart::Waist, 85.0)
            .unwrap();

        // A fresh load sees everything
        let reloaded = store.load();
        assert_eq!(reloaded, stats);
        assert_eq!(reloaded.height, Some(175.0));
        assert_eq!(reloaded.weight_history.len(), 1);
        assert_eq!(reloaded.series(BodyPart::Waist).len(), 1);
    }

    #[test]
    fn test_roundtrip_is_deep_equal() {
        let (_dir, store) = test_store();

        let mut stats = store.load();
        stats = store.set_height(&stats, 182.5).unwrap();
        for value in [80.0, 81.2, 79.9] {
            stats = store.add_weight(&stats, value).unwrap();
        }
        stats = store
            .add_measurement(&stats, BodyPart::LeftArm, 35.5)
            .unwrap();

        assert_eq!(store.load(), stats);
    }

    #[test]
    fn test_set_height_replaces() {
        let (_dir, store) = test_store();

        let stats = store.load();
        let stats = store.set_height(&stats, 170.0).unwrap();
        let stats = store.set_height(&stats, 171.0).unwrap();

        assert_eq!(stats.height, Some(171.0));
        assert_eq!(store.load().height, Some(171.0));
    }

    #[test]
    fn test_add_weight_is_append_only() {
        let (_dir, store) = test_store();

        let stats = store.load();
        let stats = store.add_weight(&stats, 80.0).unwrap();
        let stats = store.add_weight(&stats, 81.0).unwrap();

        assert_eq!(stats.weight_history.len(), 2);
        assert_eq!(stats.weight_history[0].value, 80.0);
        assert_eq!(stats.weight_history[1].value, 81.0);
        assert_eq!(stats.latest_weight().unwrap().value, 81.0);
    }

    #[test]
    fn test_invalid_values_are_rejected_without_persisting() {
        let (_dir, store) = test_store();
        let stats = store.load();

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                store.add_weight(&stats, bad),
                Err(Error::InvalidValue(_))
            ));
            assert!(matches!(
                store.set_height(&stats, bad),
                Err(Error::InvalidValue(_))
            ));
        }

        // Nothing was written
        assert_eq!(store.load(), BodyStats::default());
    }

    #[test]
    fn test_corrupt_record_degrades_to_default() {
        let (dir, store) = test_store();

        std::fs::write(
            dir.path().join(format!("{}.json", BODY_STATS_KEY)),
            "{ not valid json",
        )
        .unwrap();

        assert_eq!(store.load(), BodyStats::default());
    }

    #[test]
    fn test_persisted_record_uses_stable_field_names() {
        let (dir, store) = test_store();

        let stats = store.load();
        let stats = store.add_weight(&stats, 80.0).unwrap();
        store
            .add_measurement(&stats, BodyPart::RightThigh, 55.0)
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join(format!("{}.json", BODY_STATS_KEY)))
            .unwrap();
        assert!(raw.contains("\"weightHistory\""));
        assert!(raw.contains("\"rightThigh\""));
        assert!(raw.contains("\"measurements\""));
    }
}
