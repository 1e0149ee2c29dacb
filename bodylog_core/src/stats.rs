//! Derived statistics over measurement series.
//!
//! Pure functions only: trend direction between the two date-latest
//! entries, BMI, and its category. Nothing here touches storage.

use crate::types::{BodyStats, Measurement};

/// Differences smaller than this count as no change
const STABLE_THRESHOLD: f64 = 0.1;

/// Direction of change between the two most recent entries of a series.
///
/// Up/Down describe the numeric value only; whether a direction is
/// favorable is the presentation layer's judgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Last entry of a series in insertion order, or None if empty
pub fn latest(series: &[Measurement]) -> Option<&Measurement> {
    series.last()
}

/// Trend between the two date-latest entries of a series.
///
/// Returns None for series with fewer than 2 entries. The comparison is by
/// `date`, not insertion order, so a backdated entry never counts as "most
/// recent" here even though [`latest`] would still return it.
pub fn trend(series: &[Measurement]) -> Option<Trend> {
    if series.len() < 2 {
        return None;
    }

    let mut by_date: Vec<&Measurement> = series.iter().collect();
    by_date.sort_by(|a, b| b.date.cmp(&a.date));

    let diff = by_date[0].value - by_date[1].value;
    let direction = if diff.abs() < STABLE_THRESHOLD {
        Trend::Stable
    } else if diff > 0.0 {
        Trend::Up
    } else {
        Trend::Down
    };
    Some(direction)
}

/// Body Mass Index: weight (kg) over squared height (m)
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

/// BMI classification with a display label and severity rank
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value. Breakpoints are inclusive on the upper side:
    /// exactly 18.5 is Normal, exactly 25.0 is Overweight, exactly 30.0 is
    /// Obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Distance from the healthy band: Normal is 0, Obese is 3
    pub fn severity(&self) -> u8 {
        match self {
            BmiCategory::Normal => 0,
            BmiCategory::Underweight => 1,
            BmiCategory::Overweight => 2,
            BmiCategory::Obese => 3,
        }
    }
}

impl BodyStats {
    /// BMI from the insertion-latest weight and the stored height, or None
    /// when either is absent
    pub fn bmi(&self) -> Option<f64> {
        match (self.latest_weight(), self.height) {
            (Some(weight), Some(height)) => Some(bmi(weight.value, height)),
            _ => None,
        }
    }
}
