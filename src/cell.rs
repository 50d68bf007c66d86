use serde::{Deserialize, Serialize};

/// What a cell holds, fixed once at generation time.
///
/// `Safe(n)` carries the number of mine-bearing Moore neighbors (0..=8).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Safe(u8),
}

impl CellContent {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Number of adjacent mines, `None` for a mine cell.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Safe(count) => Some(count),
        }
    }
}

/// Player-visible state of a cell. Only the wrapper changes over the life of
/// a game; the content payload never does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Closed(CellContent),
    Flagged(CellContent),
    Opened(CellContent),
}

impl CellState {
    pub const fn content(self) -> CellContent {
        match self {
            Self::Closed(content) | Self::Flagged(content) | Self::Opened(content) => content,
        }
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged(_))
    }

    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened(_))
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed(CellContent::Safe(0))
    }
}
