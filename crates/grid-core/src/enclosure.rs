//! Enclosure corrector.
//!
//! Groups 4-connected Plain/Hill cells into regions. A region that never
//! reaches the grid edge and never borders Water is an unreachable pocket and
//! is turned into Mountain. Other terrain (Mountain in particular) neither
//! joins a region nor opens it.

use log::debug;
use serde::Serialize;

use crate::cell::Terrain;
use crate::grid::Grid;

/// 4-neighbourhood offsets `(d_row, d_col)`.
const NEIGHBORS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Outcome of one corrector pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnclosureReport {
    /// Plain/Hill regions found.
    pub regions: usize,
    /// Regions reclassified to Mountain.
    pub enclosed_regions: usize,
    /// Cells reclassified to Mountain.
    pub reclassified_cells: usize,
}

/// Reclassify every enclosed Plain/Hill region to Mountain.
///
/// Traversal uses an explicit work-list and marks cells visited when they are
/// discovered, so each cell is pushed at most once and total work is linear
/// in the number of cells.
pub fn correct_enclosures(grid: &mut Grid) -> EnclosureReport {
    let width = grid.width() as isize;
    let mut visited = vec![false; grid.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut region: Vec<usize> = Vec::new();
    let mut report = EnclosureReport::default();

    for start in 0..grid.len() {
        if visited[start] || !grid.cells()[start].terrain.is_soft() {
            continue;
        }

        report.regions += 1;
        region.clear();
        let mut enclosed = true;

        visited[start] = true;
        stack.push(start);
        region.push(start);

        while let Some(current) = stack.pop() {
            let row = current as isize / width;
            let col = current as isize % width;

            for &(dr, dc) in &NEIGHBORS {
                let nr = row + dr;
                let nc = col + dc;
                if nr < 0 || nc < 0 || nr >= width || nc >= width {
                    enclosed = false;
                    continue;
                }
                let n = (nr * width + nc) as usize;
                if visited[n] {
                    continue;
                }
                match grid.cells()[n].terrain {
                    Terrain::Plain | Terrain::Hill => {
                        visited[n] = true;
                        stack.push(n);
                        region.push(n);
                    }
                    Terrain::Water => enclosed = false,
                    Terrain::Mountain
                    | Terrain::Build
                    | Terrain::Road
                    | Terrain::Bridge
                    | Terrain::None => {}
                }
            }
        }

        if enclosed {
            report.enclosed_regions += 1;
            report.reclassified_cells += region.len();
            let cells = grid.cells_mut();
            for &i in &region {
                cells[i].terrain = Terrain::Mountain;
            }
        }
    }

    debug!(
        "enclosure pass: {} region(s), {} enclosed, {} cell(s) → Mountain",
        report.regions, report.enclosed_regions, report.reclassified_cells
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid from rows of terrain letters: P plain, H hill, W water,
    /// M mountain, N none.
    fn grid_from(rows: &[&str]) -> Grid {
        let width = rows.len();
        let mut g = Grid::uniform(width, 1000);
        for (r, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), width);
            for (c, ch) in line.chars().enumerate() {
                g.get_mut(r, c).terrain = match ch {
                    'P' => Terrain::Plain,
                    'H' => Terrain::Hill,
                    'W' => Terrain::Water,
                    'M' => Terrain::Mountain,
                    _ => Terrain::None,
                };
            }
        }
        g
    }

    fn letters(g: &Grid) -> Vec<String> {
        (0..g.width())
            .map(|r| {
                (0..g.width())
                    .map(|c| match g.get(r, c).terrain {
                        Terrain::Plain => 'P',
                        Terrain::Hill => 'H',
                        Terrain::Water => 'W',
                        Terrain::Mountain => 'M',
                        _ => 'N',
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn pocket_ringed_by_mountain_becomes_mountain() {
        let mut g = grid_from(&["MMMMM", "MPHPM", "MPPPM", "MMMMM", "PPPPP"]);
        let report = correct_enclosures(&mut g);
        assert_eq!(letters(&g), ["MMMMM", "MMMMM", "MMMMM", "MMMMM", "PPPPP"]);
        assert_eq!(report.regions, 2);
        assert_eq!(report.enclosed_regions, 1);
        assert_eq!(report.reclassified_cells, 6);
    }

    #[test]
    fn region_touching_the_edge_is_kept() {
        let mut g = grid_from(&["PMMMM", "MMMMM", "MMPMM", "MMMMM", "MMMMM"]);
        correct_enclosures(&mut g);
        assert_eq!(g.get(0, 0).terrain, Terrain::Plain);
        assert_eq!(g.get(2, 2).terrain, Terrain::Mountain);
    }

    #[test]
    fn region_bordering_water_is_kept() {
        let mut g = grid_from(&["MMMMM", "MPPMM", "MPWMM", "MMMMM", "MMMMM"]);
        let report = correct_enclosures(&mut g);
        assert_eq!(report.enclosed_regions, 0);
        assert_eq!(letters(&g)[1], "MPPMM");
    }

    #[test]
    fn lone_cell_beside_water_is_not_enclosed() {
        let mut g = grid_from(&["WWWWW", "WWWWW", "WWPWW", "WWWWW", "WWWWW"]);
        correct_enclosures(&mut g);
        assert_eq!(g.get(2, 2).terrain, Terrain::Plain);
    }

    #[test]
    fn opening_found_deep_in_the_region_still_counts() {
        // The only exit is at the far end of a winding corridor.
        let mut g = grid_from(&["MMMMM", "MPPPM", "MMMPM", "MPPPM", "MPMMM"]);
        correct_enclosures(&mut g);
        assert_eq!(letters(&g), ["MMMMM", "MPPPM", "MMMPM", "MPPPM", "MPMMM"]);
    }

    #[test]
    fn diagonal_contact_does_not_connect() {
        let mut g = grid_from(&["PMMM", "MPMM", "MMMM", "MMMM"]);
        correct_enclosures(&mut g);
        assert_eq!(g.get(0, 0).terrain, Terrain::Plain);
        assert_eq!(g.get(1, 1).terrain, Terrain::Mountain);
    }

    #[test]
    fn unclassified_cells_do_not_open_a_region() {
        let mut g = grid_from(&["NNN", "NPN", "NNN"]);
        correct_enclosures(&mut g);
        assert_eq!(g.get(1, 1).terrain, Terrain::Mountain);
        assert_eq!(g.get(0, 0).terrain, Terrain::None);
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut g = grid_from(&["WPPMM", "MMMPM", "MPMPM", "MMMMM", "HHMPW"]);
        correct_enclosures(&mut g);
        let once = g.clone();
        let report = correct_enclosures(&mut g);
        assert_eq!(g, once);
        assert_eq!(report.reclassified_cells, 0);
    }

    #[test]
    fn every_soft_cell_joins_exactly_one_region() {
        let mut g = grid_from(&["PPMPP", "PPMPP", "MMMMM", "PPMHH", "PPMHH"]);
        let report = correct_enclosures(&mut g);
        assert_eq!(report.regions, 4);
        assert_eq!(report.enclosed_regions, 0);
    }
}
