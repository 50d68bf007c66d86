use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use ndarray::Array2;

use crate::*;

/// The minesweeper game engine.
///
/// Owns the square grid and all mutation paths. Construction places mines
/// and precomputes neighbor counts synchronously, so an engine is fully
/// playable as soon as it exists. The grid, the game state, and the play
/// time are each observable: every mutating command publishes its changes
/// to registered observers before returning.
pub struct MinefieldEngine {
    dimension: Coord,
    mine_count: usize,
    grid: Observable<Array2<CellState>>,
    state: Observable<GameState>,
    play_time: Observable<u32>,
    // Disjoint coordinate sets maintained incrementally by flag toggles.
    // The game is won exactly when both are empty.
    unswept_mines: BTreeSet<Coord2>,
    misflagged_non_mines: BTreeSet<Coord2>,
}

impl MinefieldEngine {
    /// Creates a new game with randomized mine placement.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_placer(difficulty, &mut ShufflePlacer::new())
    }

    /// Creates a new game with reproducible mine placement.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_placer(difficulty, &mut ShufflePlacer::from_seed(seed))
    }

    pub fn with_placer(difficulty: Difficulty, placer: &mut impl MinePlacer) -> Self {
        let dimension = difficulty.dimension();
        let mines = placer.place(dimension, difficulty.mine_count());
        Self::build(dimension, mines)
    }

    /// Creates a game from an explicit mine layout. Errors if any coordinate
    /// falls outside the `dimension` x `dimension` grid; duplicates collapse.
    pub fn from_mine_coords(dimension: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = BTreeSet::new();
        for &coords in mine_coords {
            if coords.0 >= dimension || coords.1 >= dimension {
                return Err(GameError::OutOfBounds { coords, dimension });
            }
            mines.insert(coords);
        }
        Ok(Self::build(dimension, mines))
    }

    fn build(dimension: Coord, mines: BTreeSet<Coord2>) -> Self {
        let bounds = (dimension, dimension);
        let mut grid = Array2::from_elem(bounds, CellState::default());

        for &coords in &mines {
            grid[coords] = CellState::Closed(CellContent::Mine);
        }

        // Counting pass; mine cells keep their content and are never recounted.
        for row in 0..dimension {
            for col in 0..dimension {
                let coords = (row, col);
                if mines.contains(&coords) {
                    continue;
                }
                let count = NeighborIter::new(coords, bounds)
                    .filter(|pos| mines.contains(pos))
                    .count() as u8;
                grid[coords] = CellState::Closed(CellContent::Safe(count));
            }
        }

        let mine_count = mines.len();
        log::debug!("built {}x{} grid with {} mines", dimension, dimension, mine_count);

        Self {
            dimension,
            mine_count,
            grid: Observable::new(grid),
            state: Observable::new(GameState::default()),
            play_time: Observable::new(0),
            unswept_mines: mines,
            misflagged_non_mines: BTreeSet::new(),
        }
    }

    pub fn dimension(&self) -> Coord {
        self.dimension
    }

    pub fn total_mines(&self) -> usize {
        self.mine_count
    }

    /// Mines minus flags placed; goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        self.unswept_mines.len() as isize - self.misflagged_non_mines.len() as isize
    }

    pub fn game_state(&self) -> GameState {
        *self.state.get()
    }

    /// Elapsed play time in seconds, advanced externally via [`tick`](Self::tick).
    pub fn play_time(&self) -> u32 {
        *self.play_time.get()
    }

    pub fn grid(&self) -> &Array2<CellState> {
        self.grid.get()
    }

    pub fn cell_state(&self, coords: Coord2) -> Result<CellState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.grid.get()[coords])
    }

    /// Toggles the flag on a closed cell. A no-op on opened cells and after
    /// the game has ended; errors only on out-of-range coordinates.
    pub fn flag_cell(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.state.get().is_terminal() {
            return Ok(NoChange);
        }

        let cell = self.grid.get()[coords];
        let outcome = match cell {
            CellState::Closed(content) => {
                self.grid
                    .update(|grid| grid[coords] = CellState::Flagged(content));
                if content.is_mine() {
                    self.unswept_mines.remove(&coords);
                } else {
                    self.misflagged_non_mines.insert(coords);
                }
                Changed
            }
            CellState::Flagged(content) => {
                self.grid
                    .update(|grid| grid[coords] = CellState::Closed(content));
                if content.is_mine() {
                    self.unswept_mines.insert(coords);
                } else {
                    self.misflagged_non_mines.remove(&coords);
                }
                Changed
            }
            CellState::Opened(_) => NoChange,
        };

        if outcome.has_update() {
            self.check_for_win();
        }
        Ok(outcome)
    }

    /// Opens a closed cell. Opening a mine loses the game and reveals the
    /// full board; opening a zero-count cell flood-fills its safe region.
    /// Flagged and opened cells ignore the request.
    pub fn open_cell(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        use OpenOutcome::*;

        let coords = self.validate_coords(coords)?;
        if self.state.get().is_terminal() {
            return Ok(NoChange);
        }

        let cell = self.grid.get()[coords];
        let CellState::Closed(content) = cell else {
            return Ok(NoChange);
        };

        Ok(match content {
            CellContent::Mine => {
                self.grid
                    .update(|grid| grid[coords] = CellState::Opened(content));
                log::debug!("mine opened at {:?}, game lost", coords);
                self.state.set(GameState::Lost);
                self.reveal_all();
                Exploded
            }
            CellContent::Safe(0) => {
                let dimension = self.dimension;
                self.grid.update(|grid| {
                    grid[coords] = CellState::Opened(content);
                    flood_open(grid, coords, dimension);
                });
                if self.check_for_win() {
                    Won
                } else {
                    Opened
                }
            }
            CellContent::Safe(_) => {
                self.grid
                    .update(|grid| grid[coords] = CellState::Opened(content));
                Opened
            }
        })
    }

    /// Advances play time by one second. Called by the external timer
    /// collaborator; a no-op once the game has ended.
    pub fn tick(&mut self) {
        if self.state.get().is_terminal() {
            return;
        }
        self.play_time.update(|seconds| *seconds += 1);
    }

    pub fn observe_grid(&mut self, observer: impl FnMut(&Array2<CellState>) + 'static) {
        self.grid.subscribe(observer);
    }

    pub fn observe_game_state(&mut self, observer: impl FnMut(&GameState) + 'static) {
        self.state.subscribe(observer);
    }

    pub fn observe_play_time(&mut self, observer: impl FnMut(&u32) + 'static) {
        self.play_time.subscribe(observer);
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.dimension && coords.1 < self.dimension {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                coords,
                dimension: self.dimension,
            })
        }
    }

    /// Transitions to `Won` and reveals the board when every mine is flagged
    /// and no non-mine cell is. Returns whether the game was won.
    fn check_for_win(&mut self) -> bool {
        if self.unswept_mines.is_empty() && self.misflagged_non_mines.is_empty() {
            self.state.set(GameState::Won);
            self.reveal_all();
            true
        } else {
            false
        }
    }

    // Opens every remaining closed or flagged cell, skipping win/loss logic.
    fn reveal_all(&mut self) {
        self.grid.update(|grid| {
            for cell in grid.iter_mut() {
                if let CellState::Closed(content) | CellState::Flagged(content) = *cell {
                    *cell = CellState::Opened(content);
                }
            }
        });
    }
}

/// Iterative flood-fill from a freshly opened zero-count cell. Every closed
/// neighbor of a zero cell is opened; only zero-count cells cascade further.
/// Flagged cells are left alone, so they bound the region like mines do.
fn flood_open(grid: &mut Array2<CellState>, origin: Coord2, dimension: Coord) {
    let bounds = (dimension, dimension);
    let mut visited = BTreeSet::from([origin]);
    let mut to_visit: VecDeque<Coord2> = NeighborIter::new(origin, bounds)
        .filter(|&pos| grid[pos].is_closed())
        .collect();
    log::trace!(
        "starting flood-fill from {:?}, initial neighbors: {:?}",
        origin,
        to_visit
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        let CellState::Closed(content) = grid[visit_coords] else {
            continue;
        };
        grid[visit_coords] = CellState::Opened(content);
        log::trace!("flood opened cell at {:?}", visit_coords);

        if content == CellContent::Safe(0) {
            to_visit.extend(
                NeighborIter::new(visit_coords, bounds)
                    .filter(|&pos| grid[pos].is_closed())
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }
}

impl fmt::Debug for MinefieldEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinefieldEngine")
            .field("dimension", &self.dimension)
            .field("mine_count", &self.mine_count)
            .field("state", self.state.get())
            .field("play_time", self.play_time.get())
            .field("unswept_mines", &self.unswept_mines)
            .field("misflagged_non_mines", &self.misflagged_non_mines)
            .finish_non_exhaustive()
    }
}

/// Text rendering of the board, one row per line: `.` closed, `F` flagged,
/// `*` an opened mine, blank for an opened zero, the digit otherwise.
impl fmt::Display for MinefieldEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid.get();
        for row in 0..self.dimension {
            for col in 0..self.dimension {
                match grid[(row, col)] {
                    CellState::Closed(_) => write!(f, ".")?,
                    CellState::Flagged(_) => write!(f, "F")?,
                    CellState::Opened(CellContent::Mine) => write!(f, "*")?,
                    CellState::Opened(CellContent::Safe(0)) => write!(f, " ")?,
                    CellState::Opened(CellContent::Safe(count)) => write!(f, "{}", count)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
