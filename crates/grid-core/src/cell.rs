/// Terrain category of one grid cell. Discriminants are the exported codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Terrain {
    Plain = 0,
    Hill = 1,
    Water = 2,
    Mountain = 3,
    /// Reserved for the placement stage; never assigned here.
    Build = 4,
    /// Reserved for the placement stage; never assigned here.
    Road = 5,
    /// Reserved for the placement stage; never assigned here.
    Bridge = 6,
    None = 7,
}

impl Terrain {
    pub const ALL: [Terrain; 8] = [
        Terrain::Plain,
        Terrain::Hill,
        Terrain::Water,
        Terrain::Mountain,
        Terrain::Build,
        Terrain::Road,
        Terrain::Bridge,
        Terrain::None,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Plain and Hill are the traversable ("soft") categories the enclosure
    /// pass groups into regions.
    #[inline]
    pub fn is_soft(self) -> bool {
        match self {
            Terrain::Plain | Terrain::Hill => true,
            Terrain::Water
            | Terrain::Mountain
            | Terrain::Build
            | Terrain::Road
            | Terrain::Bridge
            | Terrain::None => false,
        }
    }
}

/// Dominant material category of a cell. Codes 0–16 double as material layer
/// indices; `None` (17) means no enabled layer had positive weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Biome {
    TemperateSavanna = 0,
    TemperateForest = 1,
    BorealTundra = 2,
    BorealForest = 3,
    BorealSavanna = 4,
    TropicalRainforest = 5,
    Iceland = 6,
    Gobi = 7,
    Desert = 8,
    Rocky = 9,
    Saline = 10,
    Wasteland = 11,
    Wetland = 12,
    DeadZones = 13,
    Water = 14,
    Road = 15,
    Soil = 16,
    None = 17,
}

/// Number of material layers, one per non-`None` biome.
pub const MATERIAL_LAYERS: usize = 17;

impl Biome {
    pub const ALL: [Biome; 18] = [
        Biome::TemperateSavanna,
        Biome::TemperateForest,
        Biome::BorealTundra,
        Biome::BorealForest,
        Biome::BorealSavanna,
        Biome::TropicalRainforest,
        Biome::Iceland,
        Biome::Gobi,
        Biome::Desert,
        Biome::Rocky,
        Biome::Saline,
        Biome::Wasteland,
        Biome::Wetland,
        Biome::DeadZones,
        Biome::Water,
        Biome::Road,
        Biome::Soil,
        Biome::None,
    ];

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Biome owned by material layer `index`; `None` past the last layer.
    pub fn from_layer(index: usize) -> Option<Self> {
        if index < MATERIAL_LAYERS {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Environment suitability (0–7).
    ///
    /// Iceland, Desert, Saline and Road map to 0, the same value `None` falls
    /// back to.
    pub fn environment(self) -> u8 {
        match self {
            Biome::TemperateSavanna => 7,
            Biome::TemperateForest => 7,
            Biome::BorealTundra => 3,
            Biome::BorealForest => 5,
            Biome::BorealSavanna => 4,
            Biome::TropicalRainforest => 7,
            Biome::Iceland => 0,
            Biome::Gobi => 3,
            Biome::Desert => 0,
            Biome::Rocky => 1,
            Biome::Saline => 0,
            Biome::Wasteland => 3,
            Biome::Wetland => 6,
            Biome::DeadZones => 2,
            Biome::Water => 3,
            Biome::Road => 0,
            Biome::Soil => 7,
            Biome::None => 0,
        }
    }
}

/// One element of the classification grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub height: u16,
    pub terrain: Terrain,
    pub biome: Biome,
    pub environment: u8,
    pub is_build: bool,
    pub is_settlement: bool,
    pub resource_type: i32,
}

impl GridCell {
    /// Unclassified cell: terrain and biome `None`, environment 0.
    pub fn new(height: u16) -> Self {
        Self {
            height,
            terrain: Terrain::None,
            biome: Biome::None,
            environment: 0,
            is_build: false,
            is_settlement: false,
            resource_type: 0,
        }
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::new(0)
    }
}
