#![forbid(unsafe_code)]

//! Core domain model and business logic for the bodylog measurement tracker.
//!
//! This crate provides:
//! - Domain types (measurements, body parts, the persisted aggregate)
//! - Derived statistics (trend, BMI)
//! - Storage gateway and measurement store
//! - Input-boundary parsing
//! - CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod input;
pub mod gateway;
pub mod store;
pub mod stats;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::{BodyPart, BodyStats, Measurement};
pub use config::Config;
pub use gateway::{JsonFileGateway, ObjectGateway};
pub use store::{StatsStore, BODY_STATS_KEY};
pub use stats::{latest, trend, bmi, BmiCategory, Trend};
pub use export::export_csv;
