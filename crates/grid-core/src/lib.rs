//! Terrain grid classifier.
//!
//! Turns an elevation raster and a set of material weight rasters into a
//! square grid of cells with height, dominant biome and a terrain category
//! (Plain / Hill / Water / Mountain) for game-world placement logic.
//!
//! ```no_run
//! use grid_core::{classify_grid, ClassifierParams, MaterialLayers, RasterBuffer};
//!
//! # fn run(elevation: RasterBuffer, materials: MaterialLayers) -> grid_core::Result<()> {
//! let grid = classify_grid(&elevation, &materials, &ClassifierParams::default())?;
//! let json = grid_core::export::to_json_pretty(&grid)?;
//! # let _ = json;
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod enclosure;
pub mod error;
pub mod export;
pub mod grid;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod sampler;
pub mod slope;

pub use cell::{Biome, GridCell, Terrain, MATERIAL_LAYERS};
pub use enclosure::{correct_enclosures, EnclosureReport};
pub use error::{ClassifyError, Result};
pub use export::CellRecord;
pub use grid::{Grid, TerrainCounts};
pub use params::ClassifierParams;
pub use pipeline::{classify_grid, ClassifiedGrid, GridClassifier, RunSummary};
pub use raster::{MaterialLayers, RasterBuffer};
pub use sampler::sample_grid;
pub use slope::classify_slopes;
