use thiserror::Error;

use crate::types::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates {coords:?} outside {dimension}x{dimension} grid")]
    OutOfBounds { coords: Coord2, dimension: usize },
}

pub type Result<T> = std::result::Result<T, GameError>;
