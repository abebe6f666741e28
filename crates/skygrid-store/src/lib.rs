//! Mission history persistence.
//!
//! Encodes completed missions to a JSON array (oldest first) and restores
//! them losslessly. The codec itself is strict — any missing field or type
//! mismatch fails the whole collection — while [`MissionStore::load`]
//! applies the best-effort history policy on top: an absent or unreadable
//! file yields an empty history instead of an error.

use skygrid_core::{FlightLog, Mission};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Failure while saving or decoding mission history.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history file i/o: {0}")]
    Io(#[from] io::Error),
    #[error("history format: {0}")]
    Format(#[from] serde_json::Error),
}

/// Encode a mission collection as pretty-printed JSON, oldest first.
pub fn encode_missions(missions: &FlightLog<Mission>) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(missions)?)
}

/// Decode a mission collection from JSON.
///
/// Strict: every field the statistics or display depend on must be present
/// and well-typed, or the whole collection is rejected. Restored missions
/// keep their stored status, timing, and battery values verbatim; no
/// `start`/`end` side effects are replayed.
pub fn decode_missions(json: &str) -> Result<FlightLog<Mission>, StoreError> {
    Ok(serde_json::from_str(json)?)
}

/// File-backed mission history.
pub struct MissionStore {
    path: PathBuf,
}

impl MissionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full history to disk.
    ///
    /// A failed write is reported to the caller; the in-memory collection
    /// is untouched either way.
    pub fn save(&self, missions: &FlightLog<Mission>) -> Result<(), StoreError> {
        let json = encode_missions(missions)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, json)?;
        info!(
            "Saved {} mission(s) to {}",
            missions.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read the history from disk.
    ///
    /// An absent file means "no history yet". Unreadable or malformed
    /// content is logged and degrades to an empty history rather than
    /// failing the caller.
    pub fn load(&self) -> FlightLog<Mission> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("No mission history at {}", self.path.display());
                return FlightLog::new();
            }
            Err(err) => {
                warn!(
                    "Could not read mission history {}: {}",
                    self.path.display(),
                    err
                );
                return FlightLog::new();
            }
        };

        match decode_missions(&raw) {
            Ok(missions) => {
                info!(
                    "Loaded {} mission(s) from {}",
                    missions.len(),
                    self.path.display()
                );
                missions
            }
            Err(err) => {
                warn!(
                    "Mission history {} is malformed, starting empty: {}",
                    self.path.display(),
                    err
                );
                FlightLog::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skygrid_core::{
        Environment, FlightRecord, GpsSignal, MissionStatus, MissionType, Telemetry, ZoneKind,
    };

    fn record_at(x: i32, y: i32, captured_at: f64) -> FlightRecord {
        let telemetry = Telemetry {
            x,
            y,
            altitude_m: 120.0,
            speed_mps: 10.0,
            wind_direction_deg: 45.0,
            battery_pct: 98.7,
            temperature_c: 22.5,
            payload_attached: true,
            camera_on: false,
            photos_taken: 4,
        };
        let environment = Environment {
            zone: ZoneKind::Industrial,
            population_density: 5400,
            green_area_pct: 12.0,
            air_pollution_index: 180.0,
            tall_buildings: true,
            gps_signal: GpsSignal::Lost,
            noise_level_db: 92.0,
        };
        FlightRecord::from_parts(telemetry, environment, captured_at)
    }

    /// Started but never moved: one sample only.
    fn stationary_mission() -> Mission {
        Mission::from_parts(
            MissionType::Delivery,
            MissionStatus::Completed,
            Some(1000.5),
            Some(1010.25),
            100.0,
            Some(100.0),
            [record_at(12, 10, 1000.625)].into_iter().collect(),
        )
    }

    fn five_point_mission() -> Mission {
        let path = (0..5).map(|i| record_at(i, i, 2000.0 + i as f64 * 0.125));
        Mission::from_parts(
            MissionType::Surveillance,
            MissionStatus::Completed,
            Some(2000.0),
            Some(2060.0),
            100.0,
            Some(94.5),
            path.collect(),
        )
    }

    fn never_completed_mission() -> Mission {
        Mission::from_parts(
            MissionType::Monitoring,
            MissionStatus::InProgress,
            Some(3000.0),
            None,
            87.25,
            None,
            [record_at(0, 0, 3000.5), record_at(1, 0, 3001.5)]
                .into_iter()
                .collect(),
        )
    }

    /// Completed without a single sample: empty flight path.
    fn empty_path_mission() -> Mission {
        Mission::from_parts(
            MissionType::Monitoring,
            MissionStatus::Completed,
            Some(4000.0),
            Some(4005.0),
            100.0,
            Some(100.0),
            FlightLog::new(),
        )
    }

    fn history() -> FlightLog<Mission> {
        [
            stationary_mission(),
            five_point_mission(),
            never_completed_mission(),
            empty_path_mission(),
        ]
        .into_iter()
        .collect()
    }

    fn temp_store(tag: &str) -> MissionStore {
        let path = std::env::temp_dir().join(format!(
            "skygrid-store-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        MissionStore::new(path)
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let original = history();
        let json = encode_missions(&original).unwrap();
        let restored = decode_missions(&json).unwrap();

        // PartialEq covers every persisted field, timestamps included
        assert_eq!(restored, original);

        // Spot-check exact timestamp preservation through f64 round-trip
        let restored_first = restored.first().unwrap();
        assert_eq!(restored_first.start_time(), Some(1000.5));
        assert_eq!(
            restored_first.flight_path().first().unwrap().captured_at,
            1000.625
        );
    }

    #[test]
    fn wire_layout_matches_the_stored_format() {
        let json = encode_missions(&history()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let missions = value.as_array().unwrap();
        assert_eq!(missions.len(), 4);

        let first = &missions[0];
        assert_eq!(first["mission_type"], "delivery");
        assert_eq!(first["status"], "completed");
        assert_eq!(first["initial_battery"], 100.0);
        assert_eq!(first["flight_path"][0]["timestamp"], 1000.625);

        // Never-completed mission keeps nulls
        let open = &missions[2];
        assert_eq!(open["status"], "in_progress");
        assert!(open["end_time"].is_null());
        assert!(open["final_battery"].is_null());

        // Empty flight path stays an empty array, not null
        let empty = &missions[3];
        assert_eq!(empty["flight_path"], serde_json::json!([]));
    }

    #[test]
    fn statistics_survive_the_round_trip() {
        let json = encode_missions(&history()).unwrap();
        let restored = decode_missions(&json).unwrap();

        let originals: Vec<_> = history().iter().map(|m| m.statistics()).collect();
        let decoded: Vec<_> = restored.iter().map(|m| m.statistics()).collect();
        assert_eq!(decoded, originals);

        // One point, missing final battery, and no points at all: each
        // stays "no statistics" after restore
        assert!(decoded[0].is_none());
        assert!(decoded[1].is_some());
        assert!(decoded[2].is_none());
        assert!(decoded[3].is_none());
    }

    #[test]
    fn empty_flight_path_round_trips() {
        let original: FlightLog<Mission> = [empty_path_mission()].into_iter().collect();

        let json = encode_missions(&original).unwrap();
        let restored = decode_missions(&json).unwrap();
        assert_eq!(restored, original);

        let mission = restored.first().unwrap();
        assert!(mission.flight_path().is_empty());
        assert_eq!(mission.status(), MissionStatus::Completed);
        assert_eq!(mission.end_time(), Some(4005.0));
        assert_eq!(mission.final_battery(), Some(100.0));
    }

    #[test]
    fn decode_rejects_a_point_without_timestamp() {
        let mut value = serde_json::to_value(history()).unwrap();
        value[1]["flight_path"][0]
            .as_object_mut()
            .unwrap()
            .remove("timestamp");

        let json = serde_json::to_string(&value).unwrap();
        assert!(decode_missions(&json).is_err());
    }

    #[test]
    fn save_then_load_round_trips_through_disk() {
        let store = temp_store("roundtrip");
        let original = history();

        store.save(&original).unwrap();
        let restored = store.load();
        assert_eq!(restored, original);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn missing_file_loads_as_empty_history() {
        let store = temp_store("missing");
        let missions = store.load();
        assert!(missions.is_empty());
    }

    #[test]
    fn malformed_file_loads_as_empty_history() {
        let store = temp_store("malformed");
        fs::write(store.path(), "{ not json ]").unwrap();
        assert!(store.load().is_empty());

        // Valid JSON, wrong shape
        fs::write(store.path(), r#"[{"mission_type": "delivery"}]"#).unwrap();
        assert!(store.load().is_empty());

        let _ = fs::remove_file(store.path());
    }
}
