pub mod drone;
pub mod flight_log;
pub mod map;
pub mod mission;
pub mod models;

pub use drone::Drone;
pub use flight_log::FlightLog;
pub use map::GridMap;
pub use mission::{Mission, MissionError, MissionStatistics};
pub use models::{
    Environment, FlightRecord, GpsSignal, MissionStatus, MissionType, Telemetry, ZoneKind,
};
