//! Grid-based mine-clearing puzzle engine.
//!
//! The crate is built around [`MinefieldEngine`]: it owns the square grid of
//! [`CellState`]s, performs randomized mine placement and neighbor counting
//! at construction, and exposes two mutating commands ([`flag_cell`] and
//! [`open_cell`]) plus three observable values (grid, game state, play
//! time). Rendering, input handling, and the once-per-second timer are
//! external collaborators.
//!
//! [`flag_cell`]: MinefieldEngine::flag_cell
//! [`open_cell`]: MinefieldEngine::open_cell

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observe::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod observe;
mod types;

/// The three preset board sizes. Fixed per game instance; picking a new
/// difficulty means constructing a new engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Side length of the square grid.
    pub const fn dimension(self) -> Coord {
        match self {
            Self::Beginner => 8,
            Self::Intermediate => 16,
            Self::Expert => 32,
        }
    }

    pub const fn mine_count(self) -> usize {
        match self {
            Self::Beginner => 10,
            Self::Intermediate => 40,
            Self::Expert => 99,
        }
    }

    pub const fn total_cells(self) -> usize {
        self.dimension() * self.dimension()
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    NoChange,
    Opened,
    Exploded,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Opened => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Overall game state.
///
/// Valid transitions:
/// - Playing -> Lost (a mine was opened)
/// - Playing -> Won (all mines flagged, no false flags)
///
/// `Lost` and `Won` are terminal; the engine ignores further mutations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    Lost,
    Won,
}

impl GameState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Playing
    }
}
