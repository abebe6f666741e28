//! Mission lifecycle and statistics.
//!
//! A mission is a linear state machine (NotStarted → InProgress →
//! Completed) that owns the append-only flight path and derives summary
//! statistics from it on demand.

use crate::drone::Drone;
use crate::flight_log::FlightLog;
use crate::models::{epoch_seconds_now, FlightRecord, MissionStatus, MissionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Invalid mission state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissionError {
    #[error("mission already started")]
    AlreadyStarted,
    #[error("mission has not been started")]
    NotStarted,
    #[error("mission is not in progress")]
    NotInProgress,
    #[error("mission already completed")]
    AlreadyCompleted,
}

/// One bounded unit of drone activity and its flight-path log.
///
/// Fields serialize directly in the persisted wire layout; decoding a
/// stored mission restores state verbatim without replaying `start`/`end`
/// side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    mission_type: MissionType,
    start_time: Option<f64>,
    end_time: Option<f64>,
    status: MissionStatus,
    initial_battery: f64,
    final_battery: Option<f64>,
    flight_path: FlightLog<FlightRecord>,
}

impl Mission {
    /// Create a mission for the given drone, capturing its battery level
    /// before flight.
    pub fn new(mission_type: MissionType, drone: &Drone) -> Self {
        Self {
            mission_type,
            start_time: None,
            end_time: None,
            status: MissionStatus::NotStarted,
            initial_battery: drone.battery_pct,
            final_battery: None,
            flight_path: FlightLog::new(),
        }
    }

    /// Rebuild a mission from persisted fields. No drone is involved and
    /// no side effects run; state is restored exactly as stored.
    pub fn from_parts(
        mission_type: MissionType,
        status: MissionStatus,
        start_time: Option<f64>,
        end_time: Option<f64>,
        initial_battery: f64,
        final_battery: Option<f64>,
        flight_path: FlightLog<FlightRecord>,
    ) -> Self {
        Self {
            mission_type,
            start_time,
            end_time,
            status,
            initial_battery,
            final_battery,
            flight_path,
        }
    }

    pub fn mission_type(&self) -> MissionType {
        self.mission_type
    }

    pub fn status(&self) -> MissionStatus {
        self.status
    }

    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<f64> {
        self.end_time
    }

    pub fn initial_battery(&self) -> f64 {
        self.initial_battery
    }

    pub fn final_battery(&self) -> Option<f64> {
        self.final_battery
    }

    pub fn flight_path(&self) -> &FlightLog<FlightRecord> {
        &self.flight_path
    }

    /// Begin the mission. Valid only from `NotStarted`.
    ///
    /// Applies the mission-type side effect on the drone: Delivery attaches
    /// the payload, Surveillance turns the camera on, Monitoring changes
    /// nothing.
    pub fn start(&mut self, drone: &mut Drone) -> Result<(), MissionError> {
        match self.status {
            MissionStatus::NotStarted => {}
            MissionStatus::InProgress => return Err(MissionError::AlreadyStarted),
            MissionStatus::Completed => return Err(MissionError::AlreadyCompleted),
        }

        self.start_time = Some(epoch_seconds_now());
        self.status = MissionStatus::InProgress;

        match self.mission_type {
            MissionType::Delivery => drone.payload_attached = true,
            MissionType::Surveillance => {
                if !drone.camera_on {
                    drone.toggle_camera();
                }
            }
            MissionType::Monitoring => {}
        }
        Ok(())
    }

    /// Append a captured record to the flight path. Valid only while the
    /// mission is in progress; the initial sample is appended immediately
    /// after `start` returns.
    pub fn add_flight_point(&mut self, record: FlightRecord) -> Result<(), MissionError> {
        if self.status != MissionStatus::InProgress {
            return Err(MissionError::NotInProgress);
        }
        self.flight_path.append(record);
        Ok(())
    }

    /// Complete the mission. Valid only from `InProgress`; a second call is
    /// rejected and never overwrites `end_time` or `final_battery`.
    ///
    /// Captures the drone's remaining battery and reverses the start side
    /// effects: the payload is dropped and the camera turned off.
    pub fn end(&mut self, drone: &mut Drone) -> Result<(), MissionError> {
        match self.status {
            MissionStatus::InProgress => {}
            MissionStatus::NotStarted => return Err(MissionError::NotStarted),
            MissionStatus::Completed => return Err(MissionError::AlreadyCompleted),
        }

        self.end_time = Some(epoch_seconds_now());
        self.status = MissionStatus::Completed;
        self.final_battery = Some(drone.battery_pct);

        if drone.payload_attached {
            drone.payload_attached = false;
        }
        if drone.camera_on {
            drone.toggle_camera();
        }
        Ok(())
    }

    /// Derive the mission's summary statistics.
    ///
    /// Returns `None` for missions with fewer than two flight points or
    /// that never completed — callers must check before display. Values
    /// are recomputed on every call, never cached.
    pub fn statistics(&self) -> Option<MissionStatistics> {
        if self.flight_path.len() < 2 {
            return None;
        }
        let final_battery = self.final_battery?;
        let start_time = self.start_time?;
        let end_time = self.end_time?;

        // Pairwise access needs indexing; materialize the traversal locally.
        let points: Vec<&FlightRecord> = self.flight_path.iter().collect();

        let mut total_distance = 0.0;
        for pair in points.windows(2) {
            let a = &pair[0].telemetry;
            let b = &pair[1].telemetry;
            total_distance += f64::from((b.x - a.x).pow(2) + (b.y - a.y).pow(2)).sqrt();
        }

        let mut pollution_sum = 0.0;
        let mut population_sum = 0.0;
        let mut green_sum = 0.0;
        for point in &self.flight_path {
            pollution_sum += point.environment.air_pollution_index;
            population_sum += f64::from(point.environment.population_density);
            green_sum += point.environment.green_area_pct;
        }
        let count = self.flight_path.len() as f64;

        let battery_consumed = self.initial_battery - final_battery;
        let energy_efficiency = if total_distance > 0.0 {
            battery_consumed / total_distance
        } else {
            0.0
        };

        Some(MissionStatistics {
            total_distance,
            duration_s: end_time - start_time,
            mean_pollution: pollution_sum / count,
            mean_population_density: population_sum / count,
            mean_green_area_pct: green_sum / count,
            energy_efficiency,
        })
    }
}

/// Summary statistics derived from a completed mission.
///
/// Values carry full precision; `Display` rounds to two decimals (three
/// for efficiency) for presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionStatistics {
    /// Sum of Euclidean distances between consecutive points, in grid cells
    pub total_distance: f64,
    pub duration_s: f64,
    pub mean_pollution: f64,
    pub mean_population_density: f64,
    pub mean_green_area_pct: f64,
    /// Battery percent consumed per cell of distance; 0 when the drone
    /// never moved
    pub energy_efficiency: f64,
}

impl fmt::Display for MissionStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total distance (cells):      {:.2}", self.total_distance)?;
        writeln!(f, "Duration (s):                {:.2}", self.duration_s)?;
        writeln!(f, "Mean air pollution index:    {:.2}", self.mean_pollution)?;
        writeln!(
            f,
            "Mean population density:     {:.2}",
            self.mean_population_density
        )?;
        writeln!(
            f,
            "Mean green area (%):         {:.2}",
            self.mean_green_area_pct
        )?;
        write!(
            f,
            "Energy efficiency (%/cell):  {:.3}",
            self.energy_efficiency
        )
    }
}
