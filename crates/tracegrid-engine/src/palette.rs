use serde::Serialize;
use sha2::{Digest, Sha256};

/// Named badge colours a seed can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedColor {
    Red,
    Pink,
    Grape,
    Violet,
    Indigo,
    Blue,
    Cyan,
    Teal,
    Green,
    Lime,
    Yellow,
    Orange,
}

impl SeedColor {
    pub const ALL: [SeedColor; 12] = [
        SeedColor::Red,
        SeedColor::Pink,
        SeedColor::Grape,
        SeedColor::Violet,
        SeedColor::Indigo,
        SeedColor::Blue,
        SeedColor::Cyan,
        SeedColor::Teal,
        SeedColor::Green,
        SeedColor::Lime,
        SeedColor::Yellow,
        SeedColor::Orange,
    ];

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            SeedColor::Red => (250, 82, 82),
            SeedColor::Pink => (230, 73, 128),
            SeedColor::Grape => (190, 75, 219),
            SeedColor::Violet => (121, 80, 242),
            SeedColor::Indigo => (76, 110, 245),
            SeedColor::Blue => (34, 139, 230),
            SeedColor::Cyan => (21, 170, 191),
            SeedColor::Teal => (18, 184, 134),
            SeedColor::Green => (64, 192, 87),
            SeedColor::Lime => (130, 201, 30),
            SeedColor::Yellow => (250, 176, 5),
            SeedColor::Orange => (253, 126, 20),
        }
    }
}

/// Deterministic colour for a label
///
/// The same seed must map to the same colour in every process. Distinct
/// seeds may collide.
pub trait Palette: Send + Sync {
    fn color_from_seed(&self, seed: &str) -> SeedColor;
}

/// SHA-256 of the seed modulo the palette size
#[derive(Debug, Clone, Copy, Default)]
pub struct HashPalette;

impl Palette for HashPalette {
    fn color_from_seed(&self, seed: &str) -> SeedColor {
        let digest = Sha256::digest(seed.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest[..8]);
        let index = u64::from_be_bytes(prefix) % SeedColor::ALL.len() as u64;
        SeedColor::ALL[index as usize]
    }
}
