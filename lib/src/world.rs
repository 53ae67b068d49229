//! The dense world.

use crate::{
    cells::{Coord, LifeCell, State, DEAD},
    error::Error,
    pattern::CellSeed,
    rules::Rule,
    traits::Engine,
};
use std::mem;

/// Offsets of the eight cells in the Moore neighborhood.
pub(crate) const NBHD: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A dense rectangular world.
///
/// All cells live in one contiguous slice owned by the world; a cell
/// never outlives it. Neighbor relations are precomputed arena
/// indices, not pointers, wired at build time with out-of-bounds
/// neighbors skipped — a corner cell has exactly 3 neighbors and
/// there is no wraparound.
pub struct World {
    /// Number of horizontal cells.
    width: i32,

    /// Number of vertical cells.
    height: i32,

    /// All the cells, indexed by `x * height + y`.
    cells: Box<[LifeCell]>,

    /// The neighbor indices of each cell, in the same order as
    /// [`cells`](#structfield.cells). `None` marks a skipped
    /// out-of-bounds neighbor.
    nbhd: Box<[[Option<u32>; 8]]>,

    /// Coordinates whose visual state changed since the last drain.
    dirty: Vec<Coord>,
}

impl World {
    /// Creates a new all-dead world.
    ///
    /// A zero-sized world is valid and empty, not an error. Negative
    /// extents are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let (cells, nbhd) = Self::build(width, height);
        Self {
            width,
            height,
            cells,
            nbhd,
            dirty: Vec::new(),
        }
    }

    /// Allocates the cell arena and wires the neighbor indices.
    fn build(width: i32, height: i32) -> (Box<[LifeCell]>, Box<[[Option<u32>; 8]]>) {
        let size = (width as usize) * (height as usize);
        let mut cells = Vec::with_capacity(size);
        let mut nbhd = Vec::with_capacity(size);
        for x in 0..width {
            for y in 0..height {
                cells.push(LifeCell::new((x, y)));
                let mut indices = [None; 8];
                for (i, (dx, dy)) in NBHD.iter().enumerate() {
                    let (nx, ny) = (x + dx, y + dy);
                    if nx >= 0 && nx < width && ny >= 0 && ny < height {
                        indices[i] = Some((nx * height + ny) as u32);
                    }
                }
                nbhd.push(indices);
            }
        }
        (cells.into_boxed_slice(), nbhd.into_boxed_slice())
    }

    /// Number of horizontal cells.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Number of vertical cells.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The arena index of a coordinate, or `None` when out of bounds.
    #[inline]
    fn index_of(&self, (x, y): Coord) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((x * self.height + y) as usize)
        } else {
            None
        }
    }

    /// Finds a cell by its coordinates. Bounds-checked.
    pub fn cell_at(&self, coord: Coord) -> Option<&LifeCell> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    /// Whether the cell at `coord` is alive. Out-of-bounds is dead.
    pub fn is_alive_at(&self, coord: Coord) -> bool {
        self.cell_at(coord).map_or(false, LifeCell::is_alive)
    }

    /// The neighbors of the cell at `coord`, bounds-checked.
    ///
    /// Out-of-bounds neighbors are simply absent from the list.
    pub fn neighbors(&self, coord: Coord) -> Vec<&LifeCell> {
        match self.index_of(coord) {
            Some(i) => self.nbhd[i]
                .iter()
                .flatten()
                .map(|&n| &self.cells[n as usize])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Assigns a state to one cell, discarding its pending state.
    pub fn set_state(&mut self, coord: Coord, state: State) -> Result<(), Error> {
        let i = self.index_of(coord).ok_or(Error::OutOfBounds(coord))?;
        if self.cells[i].state() != state {
            self.dirty.push(coord);
        }
        self.cells[i].set_state(state);
        Ok(())
    }

    /// Rebuilds the world with new extents.
    ///
    /// Resizing is destructive unless `recover` is set, in which case
    /// every coordinate in the new bounds is re-seeded from the old
    /// grid (dead for newly added coordinates). State outside the new
    /// bounds is dropped without error.
    pub fn resize(&mut self, width: i32, height: i32, recover: bool) {
        let width = width.max(0);
        let height = height.max(0);
        log::debug!(
            "resizing world from {}x{} to {}x{} (recover: {})",
            self.width,
            self.height,
            width,
            height,
            recover
        );
        let old = mem::replace(self, Self::new(width, height));
        if recover {
            for coord in old.live_cells() {
                if self.index_of(coord).is_some() {
                    let state = old.state_at(coord);
                    // Re-seeding only live cells: new cells start dead.
                    let _ = self.set_state(coord, state);
                }
            }
        }
    }

    /// Count of living neighbors of the cell at arena index `i`.
    #[inline]
    fn live_neighbors(&self, i: usize) -> u8 {
        self.nbhd[i]
            .iter()
            .flatten()
            .filter(|&&n| self.cells[n as usize].is_alive())
            .count() as u8
    }
}

impl Engine for World {
    fn load(&mut self, pattern: &[CellSeed]) -> Result<(), Error> {
        // Fail fast before mutating anything, so a bad seed list
        // leaves the grid untouched.
        for seed in pattern {
            if self.index_of(seed.coord()).is_none() {
                return Err(Error::OutOfBounds(seed.coord()));
            }
        }
        for seed in pattern {
            self.set_state(seed.coord(), seed.state)?;
        }
        Ok(())
    }

    fn clear(&mut self) {
        for i in 0..self.cells.len() {
            if self.cells[i].is_alive() {
                self.dirty.push(self.cells[i].coord);
            }
            self.cells[i].set_state(DEAD);
        }
    }

    fn step(&mut self, rule: &dyn Rule) -> usize {
        // Pass 1: compute every pending state from pre-tick state
        // only. Pending states are stored aside, so iteration order
        // cannot leak a neighbor's future into this generation.
        for i in 0..self.cells.len() {
            let count = self.live_neighbors(i);
            let state = self.cells[i].state();
            self.cells[i].next = Some(rule.next_state(state, count));
        }

        // Pass 2: commit. All-or-nothing per tick; a redraw never
        // observes a partially committed generation.
        let mut changed = 0;
        for i in 0..self.cells.len() {
            if self.cells[i].commit() {
                self.dirty.push(self.cells[i].coord);
                changed += 1;
            }
        }
        changed
    }

    fn state_at(&self, coord: Coord) -> State {
        self.cell_at(coord).map_or(DEAD, LifeCell::state)
    }

    fn toggle(&mut self, coord: Coord) -> Result<State, Error> {
        let state = !self.state_at(coord);
        self.set_state(coord, state)?;
        Ok(state)
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|cell| cell.is_alive())
            .map(|cell| cell.coord)
            .collect()
    }

    fn take_dirty(&mut self) -> Vec<Coord> {
        mem::take(&mut self.dirty)
    }

    fn resize_hint(&mut self, width: i32, height: i32, recover: bool) {
        self.resize(width, height, recover);
    }
}
