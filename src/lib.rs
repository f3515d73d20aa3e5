//! Finite toroidal Game of Life engine.

pub mod enc;
pub mod glider;
pub mod grid;
pub mod patterns;
pub mod pos;

pub use enc::{Codec, DecodeError, JsonSnapshot, RunLengthEncoded};
pub use glider::{Configuration, Orientation};
pub use grid::{GridSnapshot, LifeGrid, SnapshotError};
pub use pos::Pos2;
