//! Drone state and sampling.

use crate::models::{Environment, FlightRecord, Telemetry};
use rand::Rng;

/// Battery cost per grid cell of travel, in percent.
const BATTERY_PCT_PER_CELL: f64 = 0.1;
/// Battery cost of taking one photo, in percent.
const BATTERY_PCT_PER_PHOTO: f64 = 0.05;
/// Simulated cruise speed per cell of movement, m/s.
const SPEED_MPS_PER_CELL: f64 = 10.0;

/// Current state of the drone: the spec's drone-state provider.
///
/// Missions read the battery and flip the payload/camera flags; the
/// presentation layer drives movement and sampling.
#[derive(Debug, Clone)]
pub struct Drone {
    pub x: i32,
    pub y: i32,
    pub altitude_m: f64,
    pub speed_mps: f64,
    pub wind_direction_deg: f64,
    pub battery_pct: f64,
    pub temperature_c: f64,
    pub payload_attached: bool,
    pub camera_on: bool,
    pub photos_taken: u32,
}

impl Drone {
    /// Place a fully charged drone at (x, y) with randomized ambient
    /// conditions.
    pub fn new<R: Rng + ?Sized>(x: i32, y: i32, rng: &mut R) -> Self {
        Self {
            x,
            y,
            altitude_m: rng.random_range(50..=150) as f64,
            speed_mps: 0.0,
            wind_direction_deg: rng.random_range(0..=360) as f64,
            battery_pct: 100.0,
            temperature_c: rng.random_range(15.0..=35.0),
            payload_attached: false,
            camera_on: false,
            photos_taken: 0,
        }
    }

    /// Move by (dx, dy) grid cells, burning battery proportional to the
    /// distance covered. Battery floors at 0; an empty battery grounds the
    /// drone (no movement).
    pub fn fly(&mut self, dx: i32, dy: i32) {
        if self.battery_pct <= 0.0 {
            return;
        }
        self.x += dx;
        self.y += dy;

        let distance = f64::from(dx * dx + dy * dy).sqrt();
        self.battery_pct = (self.battery_pct - BATTERY_PCT_PER_CELL * distance).max(0.0);
        self.speed_mps = SPEED_MPS_PER_CELL * distance;
    }

    pub fn toggle_camera(&mut self) {
        self.camera_on = !self.camera_on;
    }

    /// Take a photo if the camera is on and there is battery left for it.
    pub fn take_photo(&mut self) {
        if self.camera_on && self.battery_pct > BATTERY_PCT_PER_PHOTO {
            self.photos_taken += 1;
            self.battery_pct -= BATTERY_PCT_PER_PHOTO;
        }
    }

    /// Snapshot telemetry and the environment of the cell the drone is
    /// over, producing one timestamped flight record.
    pub fn sample(&self, cell: &Environment) -> FlightRecord {
        let telemetry = Telemetry {
            x: self.x,
            y: self.y,
            altitude_m: self.altitude_m,
            speed_mps: self.speed_mps,
            wind_direction_deg: self.wind_direction_deg,
            battery_pct: self.battery_pct,
            temperature_c: self.temperature_c,
            payload_attached: self.payload_attached,
            camera_on: self.camera_on,
            photos_taken: self.photos_taken,
        };
        FlightRecord::new(telemetry, cell.clone())
    }
}
