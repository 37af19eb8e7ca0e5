use std::fmt::Write as _;

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::index,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Piece, ShapeCatalog};

/// Number of pieces a full tray holds.
pub const TRAY_SIZE: usize = 3;

/// Pieces currently in the tray, in tray order.
pub type TrayPieces = ArrayVec<Piece, TRAY_SIZE>;

/// Seed for deterministic tray generation.
///
/// A 128-bit seed for the tray's random number generator. Two trays created
/// with the same seed and refilled from the same catalog produce the same
/// pieces in the same order, which makes recorded sessions reproducible.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfit_engine::{GameEngine, TraySeed};
/// use rand::Rng as _;
///
/// let seed: TraySeed = rand::rng().random();
/// let a = GameEngine::with_seed(seed);
/// let b = GameEngine::with_seed(seed);
/// assert_eq!(a.tray().pieces(), b.tray().pieces());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraySeed([u8; 16]);

impl TraySeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parses a 32-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, String> {
        if hex_str.len() != 32 {
            return Err(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            ));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| format!("invalid hex: {hex_str} ({e})"))?;
        Ok(Self(num.to_be_bytes()))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        hex_str
    }
}

impl std::str::FromStr for TraySeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for TraySeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for TraySeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

impl Distribution<TraySeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TraySeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TraySeed(seed)
    }
}

/// The pieces waiting to be placed.
///
/// The tray is refilled as a whole: [`Self::refill`] draws [`TRAY_SIZE`]
/// distinct shapes uniformly at random from the catalog and gives each one a
/// uniformly random color. Pieces are then removed one by one as they are
/// placed.
#[derive(Debug, Clone)]
pub struct Tray {
    rng: Pcg32,
    pieces: TrayPieces,
}

impl Default for Tray {
    fn default() -> Self {
        Self::new()
    }
}

impl Tray {
    /// Creates an empty tray with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic generation.
    #[must_use]
    pub fn with_seed(seed: TraySeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            pieces: ArrayVec::new(),
        }
    }

    /// Replaces the tray content with freshly sampled pieces.
    ///
    /// Shapes are sampled without replacement, so one refill never holds the
    /// same orientation twice. A catalog smaller than [`TRAY_SIZE`] yields
    /// a shorter tray.
    pub fn refill(&mut self, catalog: &ShapeCatalog) {
        let amount = TRAY_SIZE.min(catalog.len());
        let picks = index::sample(&mut self.rng, catalog.len(), amount);
        self.pieces.clear();
        for i in picks {
            let shape = catalog.shapes()[i];
            let color = self.rng.random();
            self.pieces.push(Piece::new(shape, color));
        }
    }

    /// Removes and returns the piece at `index`, shifting later pieces left.
    pub fn remove_at(&mut self, index: usize) -> Option<Piece> {
        (index < self.pieces.len()).then(|| self.pieces.remove(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Copies the pieces out, leaving the random generator behind.
    pub(crate) fn snapshot(&self) -> TrayPieces {
        self.pieces.clone()
    }

    /// Puts back pieces taken with [`Self::snapshot`].
    ///
    /// The random generator keeps its current state.
    pub(crate) fn restore(&mut self, pieces: TrayPieces) {
        self.pieces = pieces;
    }
}
