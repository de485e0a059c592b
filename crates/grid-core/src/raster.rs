//! Decoded RGBA pixel buffers handed in by the acquisition layer, and the
//! set of material weight layers sampled for the dominant biome.

use log::trace;

use crate::cell::{Biome, MATERIAL_LAYERS};
use crate::error::{ClassifyError, Result};

/// Bytes per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

pub const RED: usize = 0;
pub const GREEN: usize = 1;

/// An immutable 4-channel raster, row-major, `width × height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Wrap a decoded RGBA buffer. `data` must hold exactly
    /// `width * height * 4` bytes; `layer` names the raster in errors.
    pub fn new(layer: &str, width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| ClassifyError::RasterTooLarge {
                layer: layer.to_string(),
                width,
                height,
            })?;
        if data.len() != expected {
            return Err(ClassifyError::MalformedRaster {
                layer: layer.to_string(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// A raster with every pixel set to `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let data = rgba.iter().copied().cycle().take(width * height * CHANNELS).collect();
        Self { width, height, data }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Byte at `(pixelIndex * 4 + channel)`, with pixelIndex = `y * width + x`.
    pub fn channel(&self, x: usize, y: usize, channel: usize) -> Result<u8> {
        if !self.contains(x, y) {
            return Err(self.out_of_range("input", x, y));
        }
        Ok(self.data[(y * self.width + x) * CHANNELS + channel])
    }

    /// 16-bit elevation packed as red = low byte, green = high byte.
    pub fn elevation(&self, x: usize, y: usize) -> Result<u16> {
        let lo = self.channel(x, y, RED)? as u16;
        let hi = self.channel(x, y, GREEN)? as u16;
        Ok((hi << 8) | lo)
    }

    /// Overwrite one pixel. Used to build synthetic inputs.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    pub(crate) fn out_of_range(&self, layer: &str, x: usize, y: usize) -> ClassifyError {
        ClassifyError::OutOfRange {
            layer: layer.to_string(),
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Pack a 16-bit elevation into the RGBA layout read by [`RasterBuffer::elevation`].
pub fn elevation_rgba(height: u16) -> [u8; 4] {
    [(height & 0xFF) as u8, (height >> 8) as u8, 0, 255]
}

#[derive(Debug, Clone)]
struct MaterialLayer {
    raster: RasterBuffer,
    enabled: bool,
}

/// Up to 17 material weight rasters, one slot per biome layer index.
/// Each slot may be absent, and present layers may be disabled by the caller.
#[derive(Debug, Clone, Default)]
pub struct MaterialLayers {
    slots: [Option<MaterialLayer>; MATERIAL_LAYERS],
}

impl MaterialLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raster for layer `index` (enabled). Replaces any previous one.
    pub fn insert(&mut self, index: usize, raster: RasterBuffer) -> Result<()> {
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            ClassifyError::Configuration(format!(
                "material index {index} is outside 0..={}",
                MATERIAL_LAYERS - 1
            ))
        })?;
        *slot = Some(MaterialLayer { raster, enabled: true });
        Ok(())
    }

    /// Enable or disable layer `index`. Ignored for absent layers.
    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(Some(layer)) = self.slots.get_mut(index) {
            layer.enabled = enabled;
        }
    }

    pub fn is_enabled(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(layer)) if layer.enabled)
    }

    pub fn get(&self, index: usize) -> Option<&RasterBuffer> {
        self.slots.get(index)?.as_ref().map(|l| &l.raster)
    }

    /// Present, enabled layers in ascending index order.
    pub fn enabled(&self) -> impl Iterator<Item = (usize, &RasterBuffer)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match slot {
            Some(layer) if layer.enabled => Some((i, &layer.raster)),
            _ => None,
        })
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }

    /// Reject a request that has no usable material data at all.
    pub fn require_usable(&self) -> Result<()> {
        if self.enabled_count() == 0 {
            return Err(ClassifyError::MissingInput(
                "no enabled material layer is loaded".to_string(),
            ));
        }
        Ok(())
    }

    /// Dominant biome at raster pixel `(x, y)`.
    ///
    /// Layers are scanned in ascending index order and the red channel is the
    /// weight. A later layer replaces the current best only when strictly
    /// heavier, so ties stay with the lowest index. Weight 0 everywhere
    /// yields `Biome::None`.
    pub fn dominant_biome(&self, x: usize, y: usize) -> Result<Biome> {
        let mut max_weight = 0u8;
        let mut biome = Biome::None;
        for (index, raster) in self.enabled() {
            if !raster.contains(x, y) {
                return Err(raster.out_of_range(&format!("material {index}"), x, y));
            }
            let weight = raster.channel(x, y, RED)?;
            if weight > max_weight {
                max_weight = weight;
                biome = Biome::from_layer(index).unwrap_or(Biome::None);
            }
        }
        trace!("pixel ({x}, {y}): dominant {biome:?} (weight {max_weight})");
        Ok(biome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_layer(w: u8) -> RasterBuffer {
        RasterBuffer::filled(4, 4, [w, 0, 0, 255])
    }

    #[test]
    fn elevation_reassembles_low_and_high_bytes() {
        let mut r = RasterBuffer::filled(2, 2, [0, 0, 0, 255]);
        r.set_pixel(1, 1, [0xCD, 0x12, 0, 255]);
        assert_eq!(r.elevation(1, 1).unwrap(), 0x12CD);
        assert_eq!(r.elevation(1, 1).unwrap(), 4813);
        assert_eq!(r.elevation(0, 0).unwrap(), 0);
    }

    #[test]
    fn elevation_rgba_inverts_packing() {
        let r = RasterBuffer::filled(1, 1, elevation_rgba(54_321));
        assert_eq!(r.elevation(0, 0).unwrap(), 54_321);
    }

    #[test]
    fn wrong_buffer_length_is_rejected() {
        let err = RasterBuffer::new("elevation", 2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, ClassifyError::MalformedRaster { expected: 16, actual: 15, .. }));
        assert!(err.to_string().starts_with("elevation raster holds 15 bytes"), "{err}");
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let err = RasterBuffer::new("material 3", usize::MAX / 2, 3, Vec::new()).unwrap_err();
        match err {
            ClassifyError::RasterTooLarge { layer, height, .. } => {
                assert_eq!(layer, "material 3");
                assert_eq!(height, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Wraps to exactly 0 bytes with unchecked arithmetic.
        let side = 1usize << (usize::BITS / 2);
        assert!(RasterBuffer::new("elevation", side, side, Vec::new()).is_err());
    }

    #[test]
    fn reading_past_the_edge_reports_out_of_range() {
        let r = RasterBuffer::filled(3, 2, [0; 4]);
        let err = r.channel(3, 0, RED).unwrap_err();
        assert!(matches!(err, ClassifyError::OutOfRange { x: 3, y: 0, width: 3, height: 2, .. }));
        assert!(r.channel(2, 2, RED).is_err());
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let mut layers = MaterialLayers::new();
        layers.insert(3, weight_layer(200)).unwrap();
        layers.insert(7, weight_layer(200)).unwrap();
        layers.insert(9, weight_layer(150)).unwrap();
        assert_eq!(layers.dominant_biome(0, 0).unwrap(), Biome::BorealForest);
    }

    #[test]
    fn strictly_heavier_layer_wins() {
        let mut layers = MaterialLayers::new();
        layers.insert(3, weight_layer(200)).unwrap();
        layers.insert(7, weight_layer(201)).unwrap();
        assert_eq!(layers.dominant_biome(2, 2).unwrap(), Biome::Gobi);
    }

    #[test]
    fn disabled_layers_are_skipped() {
        let mut layers = MaterialLayers::new();
        layers.insert(3, weight_layer(200)).unwrap();
        layers.insert(7, weight_layer(100)).unwrap();
        layers.set_enabled(3, false);
        assert!(!layers.is_enabled(3));
        assert_eq!(layers.dominant_biome(0, 0).unwrap(), Biome::Gobi);
    }

    #[test]
    fn zero_weight_everywhere_yields_none() {
        let mut layers = MaterialLayers::new();
        layers.insert(0, weight_layer(0)).unwrap();
        assert_eq!(layers.dominant_biome(1, 1).unwrap(), Biome::None);
        assert_eq!(MaterialLayers::new().dominant_biome(0, 0).unwrap(), Biome::None);
    }

    #[test]
    fn index_past_last_layer_is_a_configuration_error() {
        let mut layers = MaterialLayers::new();
        assert!(matches!(
            layers.insert(17, weight_layer(1)),
            Err(ClassifyError::Configuration(_))
        ));
    }

    #[test]
    fn require_usable_needs_an_enabled_layer() {
        let mut layers = MaterialLayers::new();
        assert!(matches!(layers.require_usable(), Err(ClassifyError::MissingInput(_))));
        layers.insert(5, weight_layer(10)).unwrap();
        assert!(layers.require_usable().is_ok());
        layers.set_enabled(5, false);
        assert!(layers.require_usable().is_err());
    }

    #[test]
    fn out_of_range_names_the_material_layer() {
        let mut layers = MaterialLayers::new();
        layers.insert(2, weight_layer(10)).unwrap();
        match layers.dominant_biome(4, 0).unwrap_err() {
            ClassifyError::OutOfRange { layer, .. } => assert_eq!(layer, "material 2"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
