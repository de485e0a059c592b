//! Pipeline orchestrator: sampler → slope classifier → enclosure corrector.

use log::{debug, info};
use serde::Serialize;

use crate::enclosure::{correct_enclosures, EnclosureReport};
use crate::error::Result;
use crate::grid::{Grid, TerrainCounts};
use crate::params::ClassifierParams;
use crate::raster::{MaterialLayers, RasterBuffer};
use crate::sampler::sample_grid;
use crate::slope::classify_slopes;

/// Full output of one classification run.
#[derive(Debug, Clone)]
pub struct ClassifiedGrid {
    pub grid: Grid,
    pub enclosure: EnclosureReport,
    pub counts: TerrainCounts,
}

/// Flat summary for logs and tool output.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub width: usize,
    pub counts: TerrainCounts,
    pub enclosure: EnclosureReport,
}

impl ClassifiedGrid {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            width: self.grid.width(),
            counts: self.counts,
            enclosure: self.enclosure,
        }
    }
}

/// Stateless pipeline runner. Every call builds a fresh grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridClassifier;

impl GridClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline.
    ///
    /// Order:
    ///   1. Parameter and raster-geometry checks (fail before any sampling)
    ///   2. Sampling of height and dominant biome
    ///   3. Slope classification
    ///   4. Enclosure correction, strictly after every slope result is in
    pub fn classify(
        &self,
        elevation: &RasterBuffer,
        materials: &MaterialLayers,
        params: &ClassifierParams,
    ) -> Result<ClassifiedGrid> {
        let mut grid = sample_grid(elevation, materials, params)?;
        classify_slopes(&mut grid, params);
        let enclosure = correct_enclosures(&mut grid);
        let counts = grid.terrain_counts();

        debug!("enclosure: {enclosure:?}");
        info!("classified {0}×{0} grid: {counts}", grid.width());

        Ok(ClassifiedGrid { grid, enclosure, counts })
    }
}

/// Run the pipeline and keep only the grid.
pub fn classify_grid(
    elevation: &RasterBuffer,
    materials: &MaterialLayers,
    params: &ClassifierParams,
) -> Result<Grid> {
    GridClassifier::new()
        .classify(elevation, materials, params)
        .map(|result| result.grid)
}
