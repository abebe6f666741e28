//! Random grid map generation.

use crate::models::{Environment, GpsSignal, ZoneKind};
use rand::Rng;

/// Rectangular grid of environmental zones the drone flies over.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Environment>,
}

impl GridMap {
    /// Generate a `width` x `height` map of random cells.
    pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let cells = (0..width * height).map(|_| random_cell(rng)).collect();
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinates fall inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at (x, y), or `None` when out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<&Environment> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells.get(y as usize * self.width + x as usize)
    }
}

/// Generate one cell with the simulator's value distributions.
///
/// Green area is high only outside built-up zones; tall buildings occur
/// only in urban and industrial zones.
fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Environment {
    let zone = match rng.random_range(0..6) {
        0 => ZoneKind::Urban,
        1 => ZoneKind::Residential,
        2 => ZoneKind::Industrial,
        3 => ZoneKind::Rural,
        4 => ZoneKind::Forest,
        _ => ZoneKind::RiskZone,
    };

    let green_area_pct = match zone {
        ZoneKind::Rural | ZoneKind::Forest | ZoneKind::Residential => {
            rng.random_range(0..=100) as f64
        }
        _ => rng.random_range(0..=20) as f64,
    };

    let tall_buildings = matches!(zone, ZoneKind::Urban | ZoneKind::Industrial)
        && rng.random_bool(0.5);

    let gps_signal = match rng.random_range(0..3) {
        0 => GpsSignal::Strong,
        1 => GpsSignal::Weak,
        _ => GpsSignal::Lost,
    };

    Environment {
        zone,
        population_density: rng.random_range(50..=15_000),
        green_area_pct,
        air_pollution_index: rng.random_range(0..=300) as f64,
        tall_buildings,
        gps_signal,
        noise_level_db: rng.random_range(30..=110) as f64,
    }
}
