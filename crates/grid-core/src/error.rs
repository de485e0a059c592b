//! Error taxonomy for one classification run.
//!
//! Every variant aborts the run; no partial grid is ever returned.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Parameters that cannot describe a grid (non-integral width, zero sizes, …).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An input the caller should have rejected before invoking the pipeline.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// A sample coordinate falls outside its raster.
    #[error("sample ({x}, {y}) lies outside the {layer} raster ({width}×{height})")]
    OutOfRange {
        layer: String,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("{layer} raster holds {actual} bytes, expected {expected} (width × height × 4)")]
    MalformedRaster {
        layer: String,
        expected: usize,
        actual: usize,
    },

    #[error("{layer} raster dimensions {width}×{height} overflow the address space")]
    RasterTooLarge {
        layer: String,
        width: usize,
        height: usize,
    },

    #[error("malformed grid records: {0}")]
    MalformedRecords(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
