//! Core data models for the mission pipeline.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Telemetry snapshot taken from the drone at one flight moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Grid cell coordinates
    pub x: i32,
    pub y: i32,
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub wind_direction_deg: f64,
    /// Remaining battery, 0-100
    pub battery_pct: f64,
    pub temperature_c: f64,
    pub payload_attached: bool,
    pub camera_on: bool,
    pub photos_taken: u32,
}

/// Category of the terrain below the drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Urban,
    Residential,
    Industrial,
    Rural,
    Forest,
    RiskZone,
}

/// GPS reception quality at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpsSignal {
    Strong,
    Weak,
    Lost,
}

/// Environment readings for the cell under the drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub zone: ZoneKind,
    /// Inhabitants per km²
    pub population_density: u32,
    /// 0-100
    pub green_area_pct: f64,
    pub air_pollution_index: f64,
    pub tall_buildings: bool,
    pub gps_signal: GpsSignal,
    pub noise_level_db: f64,
}

/// One timestamped data point captured during flight.
///
/// Immutable after construction; owned by the mission's flight path and
/// never reordered or mutated once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub telemetry: Telemetry,
    pub environment: Environment,
    /// Capture time, seconds since epoch
    #[serde(rename = "timestamp")]
    pub captured_at: f64,
}

impl FlightRecord {
    /// Capture a new record, stamped with the current time.
    pub fn new(telemetry: Telemetry, environment: Environment) -> Self {
        Self {
            telemetry,
            environment,
            captured_at: epoch_seconds_now(),
        }
    }

    /// Rebuild a persisted record with its original capture time.
    pub fn from_parts(telemetry: Telemetry, environment: Environment, captured_at: f64) -> Self {
        Self {
            telemetry,
            environment,
            captured_at,
        }
    }
}

/// Declared purpose of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionType {
    Monitoring,
    Delivery,
    Surveillance,
}

/// Lifecycle state of a mission. Transitions are linear:
/// NotStarted → InProgress → Completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// Current wall-clock time as fractional seconds since the Unix epoch.
pub fn epoch_seconds_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
