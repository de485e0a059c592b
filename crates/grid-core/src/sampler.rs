//! Raster sampler: grid coordinates → raster pixels → initial cells.

use log::debug;

use crate::cell::{Biome, GridCell, Terrain};
use crate::error::Result;
use crate::grid::Grid;
use crate::params::ClassifierParams;
use crate::raster::{MaterialLayers, RasterBuffer};

/// Build the initial grid from the elevation raster and material layers.
///
/// Cell `(x, y)` reads raster pixel `(x * cellSize, y * cellSize)` with no
/// interpolation. Cells whose dominant biome is Water start as Water terrain;
/// every other cell starts as `Terrain::None`.
pub fn sample_grid(
    elevation: &RasterBuffer,
    materials: &MaterialLayers,
    params: &ClassifierParams,
) -> Result<Grid> {
    let width = params.validate()?;
    params.check_raster(width, elevation, "elevation")?;
    for (index, raster) in materials.enabled() {
        params.check_raster(width, raster, &format!("material {index}"))?;
    }

    let mut cells = Vec::with_capacity(width * width);
    for y in 0..width {
        let py = params.raster_coord(y);
        for x in 0..width {
            let px = params.raster_coord(x);
            if !elevation.contains(px, py) {
                return Err(elevation.out_of_range("elevation", px, py));
            }

            let mut cell = GridCell::new(elevation.elevation(px, py)?);
            cell.biome = materials.dominant_biome(px, py)?;
            cell.environment = cell.biome.environment();
            if cell.biome == Biome::Water {
                cell.terrain = Terrain::Water;
            }
            cells.push(cell);
        }
    }

    debug!(
        "sampled {width}×{width} cells from {}×{} elevation raster, {} material layer(s)",
        elevation.width(),
        elevation.height(),
        materials.enabled_count()
    );
    Ok(Grid::from_cells(width, cells))
}
