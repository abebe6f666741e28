//! Simulation state and event processing.
//!
//! All simulation state lives in an explicit [`SimState`] struct; events
//! (movement steps) are processed one at a time by its methods. There is no
//! rendering and no timing loop.

use anyhow::{bail, Result};
use rand::Rng;
use skygrid_core::{Drone, GridMap, Mission, MissionType};
use tracing::debug;

/// One discrete movement event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDir {
    fn delta(self) -> (i32, i32) {
        match self {
            MoveDir::Up => (0, -1),
            MoveDir::Down => (0, 1),
            MoveDir::Left => (-1, 0),
            MoveDir::Right => (1, 0),
        }
    }
}

/// Parse a comma-separated move script like `"R,R,U,L,D"`.
pub fn parse_moves(script: &str) -> Result<Vec<MoveDir>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.to_ascii_uppercase().as_str() {
            "U" | "UP" => Ok(MoveDir::Up),
            "D" | "DOWN" => Ok(MoveDir::Down),
            "L" | "LEFT" => Ok(MoveDir::Left),
            "R" | "RIGHT" => Ok(MoveDir::Right),
            _ => bail!("unknown move '{token}' (expected U/D/L/R)"),
        })
        .collect()
}

/// Boustrophedon scan path covering every grid cell exactly once:
/// even rows left-to-right, odd rows right-to-left.
pub fn sweep_path(width: usize, height: usize) -> Vec<(i32, i32)> {
    let mut path = Vec::with_capacity(width * height);
    for y in 0..height as i32 {
        if y % 2 == 0 {
            for x in 0..width as i32 {
                path.push((x, y));
            }
        } else {
            for x in (0..width as i32).rev() {
                path.push((x, y));
            }
        }
    }
    path
}

/// The full state of one simulation run: map, drone, current mission.
pub struct SimState {
    map: GridMap,
    drone: Drone,
    mission: Mission,
}

impl SimState {
    /// Generate the map and place the drone at its center.
    pub fn new<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        mission_type: MissionType,
        rng: &mut R,
    ) -> Self {
        let map = GridMap::generate(width, height, rng);
        let drone = Drone::new((width / 2) as i32, (height / 2) as i32, rng);
        let mission = Mission::new(mission_type, &drone);
        Self {
            map,
            drone,
            mission,
        }
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    /// Start the mission and capture the initial sample at the starting
    /// cell. The flight path is never empty after this.
    pub fn begin(&mut self) -> Result<()> {
        self.mission.start(&mut self.drone)?;
        self.sample_current_cell()
    }

    /// Process one movement event. Moves that would leave the grid are
    /// skipped without sampling.
    pub fn step(&mut self, dir: MoveDir) -> Result<()> {
        let (dx, dy) = dir.delta();
        let (nx, ny) = (self.drone.x + dx, self.drone.y + dy);
        if !self.map.contains(nx, ny) {
            debug!("Move {dir:?} would leave the grid, skipped");
            return Ok(());
        }
        self.drone.fly(dx, dy);
        self.sample_current_cell()
    }

    /// Follow the sweep path for up to `steps` cells from the drone's
    /// current position, sampling at every visited cell.
    pub fn run_sweep(&mut self, steps: usize) -> Result<()> {
        let path = sweep_path(self.map.width(), self.map.height());
        let start = path
            .iter()
            .position(|&(x, y)| x == self.drone.x && y == self.drone.y)
            .unwrap_or(0);

        let Some(&(mut px, mut py)) = path.get(start) else {
            return Ok(());
        };
        for &(x, y) in path.iter().skip(start + 1).take(steps) {
            self.drone.fly(x - px, y - py);
            self.sample_current_cell()?;
            (px, py) = (x, y);
        }
        Ok(())
    }

    /// End the mission and hand it over for display and persistence.
    pub fn finish(mut self) -> Result<Mission> {
        self.mission.end(&mut self.drone)?;
        Ok(self.mission)
    }

    fn sample_current_cell(&mut self) -> Result<()> {
        let Some(cell) = self.map.cell(self.drone.x, self.drone.y) else {
            bail!("drone at ({}, {}) is off the map", self.drone.x, self.drone.y);
        };
        // Surveillance photographs every visited cell
        if self.mission.mission_type() == MissionType::Surveillance {
            self.drone.take_photo();
        }
        let record = self.drone.sample(cell);
        self.mission.add_flight_point(record)?;
        Ok(())
    }
}
