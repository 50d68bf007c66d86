use std::collections::BTreeSet;

use rand::prelude::*;

use crate::types::{Coord, Coord2};

/// Strategy for choosing mine coordinates on a `dimension` x `dimension` grid.
pub trait MinePlacer {
    fn place(&mut self, dimension: Coord, mine_count: usize) -> BTreeSet<Coord2>;
}

/// Uniform placement by shuffling the full coordinate list and taking the
/// first `mine_count` entries. Every cell has equal a-priori probability of
/// holding a mine, and placement runs in O(cells) with no rejection loop.
#[derive(Clone, Debug)]
pub struct ShufflePlacer {
    rng: SmallRng,
}

impl ShufflePlacer {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for ShufflePlacer {
    fn default() -> Self {
        Self::new()
    }
}

impl MinePlacer for ShufflePlacer {
    fn place(&mut self, dimension: Coord, mine_count: usize) -> BTreeSet<Coord2> {
        let total_cells = dimension * dimension;
        let mine_count = if mine_count > total_cells {
            log::warn!(
                "requested {} mines but grid only fits {}, clamping",
                mine_count,
                total_cells
            );
            total_cells
        } else {
            mine_count
        };

        let mut coords: Vec<Coord2> = (0..dimension)
            .flat_map(|row| (0..dimension).map(move |col| (row, col)))
            .collect();
        coords.shuffle(&mut self.rng);

        coords.into_iter().take(mine_count).collect()
    }
}
