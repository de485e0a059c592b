//! Slope classifier: buckets every non-water cell into Plain / Hill / Mountain
//! from the steepest drop to any of its 8 neighbours.
//!
//! The pass reads only sampled heights and the sampler's Water marks, and
//! commits all results after evaluation, so scan order never matters.

use log::debug;

#[cfg(feature = "threading")]
use rayon::prelude::*;

use crate::cell::{Biome, Terrain};
use crate::grid::Grid;
use crate::params::ClassifierParams;

/// 8-neighbourhood offsets `(d_row, d_col)`.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Maximum `|Δheight| / distance` between cell `(row, col)` and its in-grid
/// neighbours. `spacing` is the world distance between axis neighbours;
/// diagonals use `spacing · √2`. Returns 0 when the cell has no neighbours.
pub fn max_slope(grid: &Grid, row: usize, col: usize, spacing: f64) -> f64 {
    let w = grid.width() as isize;
    let h0 = grid.get(row, col).height as f64;
    let mut max = 0.0f64;

    for &(dr, dc) in &NEIGHBORS {
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nc < 0 || nr >= w || nc >= w {
            continue;
        }
        let dx = dc as f64 * spacing;
        let dy = dr as f64 * spacing;
        let distance = (dx * dx + dy * dy).sqrt();
        let slope = (grid.get(nr as usize, nc as usize).height as f64 - h0).abs() / distance;
        if slope > max {
            max = slope;
        }
    }
    max
}

/// Bucket a slope: `≤ plain` → Plain, `≤ hill` → Hill, otherwise Mountain.
#[inline]
pub fn classify_slope(slope: f64, plain_threshold: f64, hill_threshold: f64) -> Terrain {
    if slope <= plain_threshold {
        Terrain::Plain
    } else if slope <= hill_threshold {
        Terrain::Hill
    } else {
        Terrain::Mountain
    }
}

fn evaluate_row(grid: &Grid, row: usize, params: &ClassifierParams) -> Vec<(Terrain, Biome)> {
    let spacing = params.cell_spacing();
    (0..grid.width())
        .map(|col| {
            let cell = grid.get(row, col);
            if cell.terrain == Terrain::Water {
                (cell.terrain, cell.biome)
            } else if (cell.height as i32) <= params.sea_level {
                (Terrain::Water, Biome::Water)
            } else {
                let slope = max_slope(grid, row, col, spacing);
                (classify_slope(slope, params.plain_threshold, params.hill_threshold), cell.biome)
            }
        })
        .collect()
}

/// Classify every cell not already marked Water.
///
/// Cells at or below sea level become Water terrain with the Water biome;
/// the rest are bucketed by [`max_slope`].
pub fn classify_slopes(grid: &mut Grid, params: &ClassifierParams) {
    let width = grid.width();
    let snapshot: &Grid = grid;

    #[cfg(feature = "threading")]
    let rows: Vec<Vec<(Terrain, Biome)>> = (0..width)
        .into_par_iter()
        .map(|row| evaluate_row(snapshot, row, params))
        .collect();

    #[cfg(not(feature = "threading"))]
    let rows: Vec<Vec<(Terrain, Biome)>> = (0..width)
        .map(|row| evaluate_row(snapshot, row, params))
        .collect();

    for (row, values) in rows.into_iter().enumerate() {
        for (col, (terrain, biome)) in values.into_iter().enumerate() {
            let cell = grid.get_mut(row, col);
            cell.terrain = terrain;
            cell.biome = biome;
        }
    }

    debug!("slope pass: {}", grid.terrain_counts());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ClassifierParams {
        ClassifierParams {
            sea_level: 100,
            plain_threshold: 0.30,
            hill_threshold: 0.75,
            cell_size: 1,
            component_size: 5,
            grid_size: 10.0,
        }
    }

    fn grid_from(width: usize, heights: &[u16]) -> Grid {
        let mut g = Grid::uniform(width, 0);
        for (cell, &h) in g.cells_mut().iter_mut().zip(heights) {
            cell.height = h;
        }
        g
    }

    #[test]
    fn axis_neighbour_uses_straight_distance() {
        // 1000 → 1005 over 10 world units.
        let g = grid_from(2, &[1000, 1005, 1000, 1000]);
        assert_relative_eq!(max_slope(&g, 1, 1, 10.0), 0.5);
    }

    #[test]
    fn diagonal_neighbour_uses_euclidean_distance() {
        let g = grid_from(2, &[1000, 1000, 1000, 1010]);
        assert_relative_eq!(max_slope(&g, 0, 0, 10.0), 10.0 / (200.0f64).sqrt());
    }

    #[test]
    fn single_cell_has_zero_slope_and_is_plain() {
        let mut g = grid_from(1, &[5000]);
        classify_slopes(&mut g, &params());
        assert_eq!(max_slope(&g, 0, 0, 10.0), 0.0);
        assert_eq!(g.get(0, 0).terrain, Terrain::Plain);
    }

    #[test]
    fn thresholds_are_inclusive_upper_bounds() {
        assert_eq!(classify_slope(0.30, 0.30, 0.75), Terrain::Plain);
        assert_eq!(classify_slope(0.31, 0.30, 0.75), Terrain::Hill);
        assert_eq!(classify_slope(0.75, 0.30, 0.75), Terrain::Hill);
        assert_eq!(classify_slope(0.76, 0.30, 0.75), Terrain::Mountain);
    }

    #[test]
    fn flat_field_is_all_plain() {
        let mut g = Grid::uniform(5, 4000);
        classify_slopes(&mut g, &params());
        assert!(g.cells().iter().all(|c| c.terrain == Terrain::Plain));
    }

    #[test]
    fn at_or_below_sea_level_becomes_water() {
        let mut g = grid_from(2, &[100, 99, 101, 101]);
        g.get_mut(0, 0).biome = Biome::Soil;
        classify_slopes(&mut g, &params());
        assert_eq!(g.get(0, 0).terrain, Terrain::Water);
        assert_eq!(g.get(0, 0).biome, Biome::Water);
        assert_eq!(g.get(0, 1).terrain, Terrain::Water);
        assert_ne!(g.get(1, 0).terrain, Terrain::Water);
    }

    #[test]
    fn sampled_water_is_left_untouched() {
        let mut g = grid_from(2, &[9000, 1000, 1000, 1000]);
        g.get_mut(0, 0).terrain = Terrain::Water;
        g.get_mut(0, 0).biome = Biome::Water;
        classify_slopes(&mut g, &params());
        assert_eq!(g.get(0, 0).terrain, Terrain::Water);
        assert_eq!(g.get(0, 0).height, 9000);
        // Neighbours still see the water cell's height.
        assert_eq!(g.get(0, 1).terrain, Terrain::Mountain);
    }

    #[test]
    fn steepest_neighbour_decides() {
        // Centre 1000; one neighbour 1005 (0.5 → Hill), one 1020 (2.0 → Mountain).
        let mut heights = [1000u16; 9];
        heights[1] = 1005;
        let mut g = grid_from(3, &heights);
        classify_slopes(&mut g, &params());
        assert_eq!(g.get(1, 1).terrain, Terrain::Hill);

        // Diagonal: 20 / (10·√2) ≈ 1.41.
        heights[8] = 1020;
        let mut g = grid_from(3, &heights);
        classify_slopes(&mut g, &params());
        assert_eq!(g.get(1, 1).terrain, Terrain::Mountain);
    }

    #[test]
    fn result_does_not_depend_on_reclassified_neighbours() {
        // A cliff between the top row and the rest: the middle row becomes
        // Mountain, the bottom row only ever sees the middle row's heights.
        let heights = [1000, 1000, 1000, 2000, 2000, 2000, 2000, 2000, 2000];
        let mut g = grid_from(3, &heights);
        classify_slopes(&mut g, &params());
        let before: Vec<u16> = heights.to_vec();
        let after: Vec<u16> = g.cells().iter().map(|c| c.height).collect();
        assert_eq!(before, after);
        assert_eq!(g.get(2, 2).terrain, Terrain::Plain);
        assert_eq!(g.get(1, 1).terrain, Terrain::Mountain);
    }
}
