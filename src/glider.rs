//! Geometry of the 5-cell glider inside its 3x3 bounding box.
//!
//! A glider is described by the side of the box it travels towards (its
//! [`Orientation`]) and by which of the two mirror-image phases it starts in
//! (its [`Configuration`]). Every orientation fills one full edge of the box,
//! the central cell of the opposite edge, and one of the two middle cells
//! beside the box's center.

use crate::Pos2;
use std::{fmt, str::FromStr};

/// The compass side a glider's full edge faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Offsets of the three cells forming the leading edge
    pub fn edge(self) -> [Pos2; 3] {
        match self {
            Self::North => [Pos2::new(0, 0), Pos2::new(1, 0), Pos2::new(2, 0)],
            Self::South => [Pos2::new(0, 2), Pos2::new(1, 2), Pos2::new(2, 2)],
            Self::East => [Pos2::new(2, 0), Pos2::new(2, 1), Pos2::new(2, 2)],
            Self::West => [Pos2::new(0, 0), Pos2::new(0, 1), Pos2::new(0, 2)],
        }
    }

    /// Offset of the center cell of the trailing edge
    pub fn central_rear(self) -> Pos2 {
        match self {
            Self::North => Pos2::new(1, 2),
            Self::South => Pos2::new(1, 0),
            Self::East => Pos2::new(0, 1),
            Self::West => Pos2::new(2, 1),
        }
    }

    /// The two candidate offsets for the middle cell
    pub fn middle_offsets(self) -> [Pos2; 2] {
        match self {
            Self::North | Self::South => [Pos2::new(0, 1), Pos2::new(2, 1)],
            Self::East | Self::West => [Pos2::new(1, 0), Pos2::new(1, 2)],
        }
    }

    /// Unit step towards the leading edge
    fn forward(self) -> Pos2 {
        match self {
            Self::North => Pos2::new(0, -1),
            Self::South => Pos2::new(0, 1),
            Self::East => Pos2::new(1, 0),
            Self::West => Pos2::new(-1, 0),
        }
    }

    /// The diagonal a glider of this orientation and configuration moves along,
    /// one cell per 4 generations
    pub fn heading(self, configuration: Configuration) -> Pos2 {
        let middle = self.middle_offsets()[configuration.index()];
        self.forward() + (middle - Pos2::one())
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation `{0}` (expected north, south, east or west)")]
pub struct ParseOrientationError(String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Self::North),
            "south" | "s" => Ok(Self::South),
            "east" | "e" => Ok(Self::East),
            "west" | "w" => Ok(Self::West),
            _ => Err(ParseOrientationError(s.to_owned())),
        }
    }
}

/// Selects which middle offset a glider uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Configuration {
    First,
    Second,
}

impl Configuration {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::First),
            1 => Some(Self::Second),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Self::Second
        } else {
            Self::First
        }
    }
}

/// Absolute positions of a glider whose bounding box starts at `origin`
pub fn glider_cells(
    origin: Pos2,
    orientation: Orientation,
    configuration: Configuration,
) -> [Pos2; 5] {
    let [a, b, c] = orientation.edge();
    let rear = orientation.central_rear();
    let middle = orientation.middle_offsets()[configuration.index()];
    [a, b, c, rear, middle].map(|offset| origin + offset)
}
