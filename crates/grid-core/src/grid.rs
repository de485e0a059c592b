use std::fmt;

use serde::Serialize;

use crate::cell::{GridCell, Terrain};

/// Square classification grid, `width × width` cells, row-major (y outer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    cells: Vec<GridCell>,
}

impl Grid {
    /// Wrap `cells`; `cells.len()` must equal `width * width`.
    pub(crate) fn from_cells(width: usize, cells: Vec<GridCell>) -> Self {
        debug_assert_eq!(cells.len(), width * width);
        Self { width, cells }
    }

    /// Grid with every cell at `height` and unclassified.
    pub fn uniform(width: usize, height: u16) -> Self {
        Self::from_cells(width, vec![GridCell::new(height); width * width])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &GridCell {
        &self.cells[row * self.width + col]
    }

    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut GridCell {
        &mut self.cells[row * self.width + col]
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [GridCell] {
        &mut self.cells
    }

    pub fn terrain_counts(&self) -> TerrainCounts {
        let mut counts = TerrainCounts::default();
        for cell in &self.cells {
            counts.add(cell.terrain);
        }
        counts
    }
}

/// Number of cells per terrain category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TerrainCounts {
    pub plain: usize,
    pub hill: usize,
    pub water: usize,
    pub mountain: usize,
    /// Build, Road, Bridge or None.
    pub other: usize,
}

impl TerrainCounts {
    fn add(&mut self, terrain: Terrain) {
        match terrain {
            Terrain::Plain => self.plain += 1,
            Terrain::Hill => self.hill += 1,
            Terrain::Water => self.water += 1,
            Terrain::Mountain => self.mountain += 1,
            Terrain::Build | Terrain::Road | Terrain::Bridge | Terrain::None => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.plain + self.hill + self.water + self.mountain + self.other
    }
}

impl fmt::Display for TerrainCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plain {}, hill {}, water {}, mountain {}",
            self.plain, self.hill, self.water, self.mountain
        )?;
        if self.other > 0 {
            write!(f, ", other {}", self.other)?;
        }
        Ok(())
    }
}
