//! Core domain types for the bodylog measurement tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Measurements (a value plus the moment it was entered)
//! - Body parts with stable persisted keys
//! - The BodyStats aggregate and its pure mutation helpers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Measurement
// ============================================================================

/// A single recorded value and the timestamp it was entered.
///
/// Immutable once created; sequences of measurements only ever grow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub date: DateTime<Utc>,
}

impl Measurement {
    /// Create a measurement stamped with the current time
    pub fn now(value: f64) -> Self {
        Self {
            value,
            date: Utc::now(),
        }
    }

    /// Create a measurement with an explicit timestamp
    pub fn at(value: f64, date: DateTime<Utc>) -> Self {
        Self { value, date }
    }
}

// ============================================================================
// Body Parts
// ============================================================================

/// The seven tracked body parts.
///
/// Serialized in camelCase so the persisted field names (`leftArm`,
/// `rightThigh`, ...) match existing records exactly.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Chest,
    Waist,
    Hips,
    LeftArm,
    RightArm,
    LeftThigh,
    RightThigh,
}

impl BodyPart {
    /// All tracked parts, in display order
    pub const ALL: [BodyPart; 7] = [
        BodyPart::Chest,
        BodyPart::Waist,
        BodyPart::Hips,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftThigh,
        BodyPart::RightThigh,
    ];

    /// The stable persisted key for this part
    pub fn key(&self) -> &'static str {
        match self {
            BodyPart::Chest => "chest",
            BodyPart::Waist => "waist",
            BodyPart::Hips => "hips",
            BodyPart::LeftArm => "leftArm",
            BodyPart::RightArm => "rightArm",
            BodyPart::LeftThigh => "leftThigh",
            BodyPart::RightThigh => "rightThigh",
        }
    }

    /// Human-readable name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            BodyPart::Chest => "Chest",
            BodyPart::Waist => "Waist",
            BodyPart::Hips => "Hips",
            BodyPart::LeftArm => "Left arm",
            BodyPart::RightArm => "Right arm",
            BodyPart::LeftThigh => "Left thigh",
            BodyPart::RightThigh => "Right thigh",
        }
    }

    /// Parse a user-supplied part name (case-insensitive against the
    /// persisted keys). Returns None for anything unrecognized.
    pub fn parse(s: &str) -> Option<BodyPart> {
        let needle = s.trim().to_lowercase();
        BodyPart::ALL
            .iter()
            .find(|p| p.key().to_lowercase() == needle)
            .copied()
    }
}

// ============================================================================
// BodyStats Aggregate
// ============================================================================

/// The single persisted aggregate: height, weight history, and per-part
/// measurement series.
///
/// `height` is a scalar that each edit replaces. The two sequence fields are
/// append-only; insertion order is entry order and is not re-sorted by date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default)]
    pub weight_history: Vec<Measurement>,

    #[serde(default)]
    pub measurements: BTreeMap<BodyPart, Vec<Measurement>>,
}

impl Default for BodyStats {
    fn default() -> Self {
        let mut measurements = BTreeMap::new();
        for part in BodyPart::ALL {
            measurements.insert(part, Vec::new());
        }
        Self {
            height: None,
            weight_history: Vec::new(),
            measurements,
        }
    }
}

impl BodyStats {
    /// Return a copy with `height` replaced (never appended)
    pub fn with_height(&self, value: f64) -> Self {
        let mut next = self.clone();
        next.height = Some(value);
        next
    }

    /// Return a copy with `entry` appended to the weight history
    pub fn with_weight(&self, entry: Measurement) -> Self {
        let mut next = self.clone();
        next.weight_history.push(entry);
        next
    }

    /// Return a copy with `entry` appended to the series for `part`
    pub fn with_measurement(&self, part: BodyPart, entry: Measurement) -> Self {
        let mut next = self.clone();
        next.measurements.entry(part).or_default().push(entry);
        next
    }

    /// The series for a part. Records written before a part existed simply
    /// lack its key; those read back as an empty series.
    pub fn series(&self, part: BodyPart) -> &[Measurement] {
        self.measurements.get(&part).map_or(&[], |s| s.as_slice())
    }

    /// Latest weight entry by insertion order (not by date)
    pub fn latest_weight(&self) -> Option<&Measurement> {
        self.weight_history.last()
    }
}
