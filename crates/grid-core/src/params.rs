use serde::{Deserialize, Serialize};

use crate::error::{ClassifyError, Result};
use crate::raster::RasterBuffer;

/// Parameters for one classification run.
/// Field names serialize in camelCase (`seaLevel`, `cellSize`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierParams {
    /// Heights at or below this value are water.
    pub sea_level: i32,
    /// Maximum slope (height units per world unit) still classed as Plain.
    pub plain_threshold: f64,
    /// Maximum slope still classed as Hill; anything steeper is Mountain.
    pub hill_threshold: f64,
    /// Raster pixels per grid cell.
    pub cell_size: i32,
    /// World extent of the component; grid width = component_size / cell_size.
    pub component_size: i32,
    /// World units per raster pixel.
    pub grid_size: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            sea_level: 3550,
            plain_threshold: 0.30,
            hill_threshold: 0.75,
            cell_size: 2,
            component_size: 510,
            grid_size: 100.0,
        }
    }
}

impl ClassifierParams {
    /// Check the parameters and return the grid width.
    pub fn validate(&self) -> Result<usize> {
        if self.cell_size <= 0 {
            return Err(config(format!("cellSize must be positive, got {}", self.cell_size)));
        }
        if self.component_size <= 0 {
            return Err(config(format!(
                "componentSize must be positive, got {}",
                self.component_size
            )));
        }
        if self.component_size % self.cell_size != 0 {
            return Err(config(format!(
                "componentSize {} is not a multiple of cellSize {}",
                self.component_size, self.cell_size
            )));
        }
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(config(format!("gridSize must be positive, got {}", self.grid_size)));
        }
        for (name, value) in [
            ("plainThreshold", self.plain_threshold),
            ("hillThreshold", self.hill_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(config(format!("{name} must be a non-negative number, got {value}")));
            }
        }
        Ok((self.component_size / self.cell_size) as usize)
    }

    /// World distance between two axis-adjacent cells.
    #[inline]
    pub fn cell_spacing(&self) -> f64 {
        self.cell_size as f64 * self.grid_size
    }

    /// Raster coordinate sampled for grid coordinate `i` (nearest neighbour).
    #[inline]
    pub fn raster_coord(&self, i: usize) -> usize {
        i * self.cell_size as usize
    }

    /// Verify that every sample of a `width × width` grid lands inside `raster`.
    pub fn check_raster(&self, width: usize, raster: &RasterBuffer, layer: &str) -> Result<()> {
        if width == 0 {
            return Ok(());
        }
        let last = self.raster_coord(width - 1);
        if !raster.contains(last, last) {
            return Err(raster.out_of_range(layer, last, last));
        }
        Ok(())
    }
}

fn config(msg: String) -> ClassifyError {
    ClassifyError::Configuration(msg)
}
