use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 6;

const LIGHT_PALETTE: [&str; PALETTE_SIZE] = [
    "#4e9de1", "#9a83e8", "#5fc29d", "#ff9c70", "#ff78a8", "#5daee5",
];
const DARK_PALETTE: [&str; PALETTE_SIZE] = [
    "#66b8ff", "#b2a0ff", "#58d6ae", "#ff8a62", "#ff6f9d", "#5aa4ff",
];

/// Index of a color in the active palette.
///
/// Pieces and board cells store palette indices rather than concrete colors, so
/// switching the [`Theme`] recolors everything already on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u8);

impl ColorId {
    /// Returns the color with the given palette index, if it is in range.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < PALETTE_SIZE {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Non-zero token used when encoding a filled board cell.
    #[must_use]
    pub const fn token(self) -> u8 {
        self.0 + 1
    }

    /// Inverse of [`Self::token`].
    #[must_use]
    pub const fn from_token(token: u8) -> Option<Self> {
        match token.checked_sub(1) {
            Some(index) => Self::new(index),
            None => None,
        }
    }
}

impl Distribution<ColorId> for StandardUniform {
    #[expect(clippy::cast_possible_truncation)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorId {
        ColorId(rng.random_range(0..PALETTE_SIZE) as u8)
    }
}

impl Serialize for ColorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for ColorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let index = u8::deserialize(deserializer)?;
        ColorId::new(index).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "color index must be less than {PALETTE_SIZE}, got {index}"
            ))
        })
    }
}

/// Color scheme used to resolve [`ColorId`]s into concrete colors.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    #[display("light")]
    Light,
    #[display("dark")]
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn palette(self) -> &'static [&'static str; PALETTE_SIZE] {
        match self {
            Theme::Light => &LIGHT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }

    /// Resolves a palette index into a CSS hex color.
    #[must_use]
    pub const fn color(self, color: ColorId) -> &'static str {
        self.palette()[color.index()]
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// A shape waiting in the tray together with the color it will be placed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Piece {
    shape: Shape,
    color: ColorId,
}

impl Piece {
    #[must_use]
    pub const fn new(shape: Shape, color: ColorId) -> Self {
        Self { shape, color }
    }

    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn color(&self) -> ColorId {
        self.color
    }
}
