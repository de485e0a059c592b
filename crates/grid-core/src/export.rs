//! Record format handed to exporters: one JSON object per cell, row-major,
//! keys `Height, Terrain, Biome, IsBuild, ResourceType, IsSettlement,
//! Environment`, enums as integer codes.

use serde::{Deserialize, Serialize};

use crate::cell::{Biome, GridCell, Terrain};
use crate::error::{ClassifyError, Result};
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CellRecord {
    pub height: u16,
    pub terrain: u8,
    pub biome: u8,
    pub is_build: bool,
    pub resource_type: i32,
    pub is_settlement: bool,
    pub environment: u8,
}

impl From<&GridCell> for CellRecord {
    fn from(cell: &GridCell) -> Self {
        Self {
            height: cell.height,
            terrain: cell.terrain.code(),
            biome: cell.biome.code(),
            is_build: cell.is_build,
            resource_type: cell.resource_type,
            is_settlement: cell.is_settlement,
            environment: cell.environment,
        }
    }
}

impl TryFrom<&CellRecord> for GridCell {
    type Error = ClassifyError;

    fn try_from(r: &CellRecord) -> Result<Self> {
        let terrain = Terrain::from_code(r.terrain).ok_or_else(|| {
            ClassifyError::MalformedRecords(format!("unknown terrain code {}", r.terrain))
        })?;
        let biome = Biome::from_code(r.biome).ok_or_else(|| {
            ClassifyError::MalformedRecords(format!("unknown biome code {}", r.biome))
        })?;
        Ok(GridCell {
            height: r.height,
            terrain,
            biome,
            environment: r.environment,
            is_build: r.is_build,
            is_settlement: r.is_settlement,
            resource_type: r.resource_type,
        })
    }
}

impl Grid {
    pub fn to_records(&self) -> Vec<CellRecord> {
        self.cells().iter().map(CellRecord::from).collect()
    }

    /// Rebuild a grid from exported records. The record count must be a
    /// perfect square.
    pub fn from_records(records: &[CellRecord]) -> Result<Grid> {
        let width = (records.len() as f64).sqrt().round() as usize;
        if width * width != records.len() {
            return Err(ClassifyError::MalformedRecords(format!(
                "{} records do not form a square grid",
                records.len()
            )));
        }
        let cells = records
            .iter()
            .map(GridCell::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Grid::from_cells(width, cells))
    }
}

/// Pretty JSON array with two-space indentation.
pub fn to_json_pretty(grid: &Grid) -> Result<String> {
    Ok(serde_json::to_string_pretty(&grid.to_records())?)
}

pub fn from_json(json: &str) -> Result<Grid> {
    let records: Vec<CellRecord> = serde_json::from_str(json)?;
    Grid::from_records(&records)
}
