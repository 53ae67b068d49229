//! A trait for the simulation engines.

use crate::{
    cells::{Coord, State, DEAD},
    error::Error,
    pattern::CellSeed,
    rules::Rule,
};

/// A generation engine.
///
/// Implemented by the dense [`World`](crate::world::World) and the
/// sparse [`Index`](crate::index::Index), so the cellular layer, the
/// scheduler and the tests can switch between them.
pub trait Engine {
    /// Loads a pattern, additively.
    ///
    /// Seeded coordinates are set to their seeded state; all other
    /// cells are left alone. An empty pattern is a no-op. Dense
    /// engines fail fast with [`Error::OutOfBounds`] when a seed lies
    /// outside the grid, leaving the grid untouched.
    fn load(&mut self, pattern: &[CellSeed]) -> Result<(), Error>;

    /// Sets every cell to dead.
    fn clear(&mut self);

    /// Advances one generation synchronously.
    ///
    /// Next states are computed from pre-tick state only, then
    /// committed in a separate pass; a neighbor's already-computed
    /// next state is never observed. Returns the number of cells
    /// whose state changed.
    fn step(&mut self, rule: &dyn Rule) -> usize;

    /// The state at a coordinate. Out-of-extent coordinates are dead.
    fn state_at(&self, coord: Coord) -> State;

    /// Flips a cell between dead and alive.
    fn toggle(&mut self, coord: Coord) -> Result<State, Error>;

    /// The coordinates of all living cells, in no particular order.
    fn live_cells(&self) -> Vec<Coord>;

    /// Drains the coordinates whose visual state changed since the
    /// last drain.
    fn take_dirty(&mut self) -> Vec<Coord>;

    /// Tells the engine the visible extents changed.
    ///
    /// Bounded engines rebuild their storage; with `recover` set they
    /// re-seed the live cells that fit in the new bounds. Unbounded
    /// engines ignore the hint, since a different viewport changes
    /// nothing about the live set.
    fn resize_hint(&mut self, _width: i32, _height: i32, _recover: bool) {}

    /// Displays a `width` × `height` window of the engine in
    /// [Plaintext](https://conwaylife.com/wiki/Plaintext) format.
    ///
    /// Dead cells are `.`, living cells are `O`.
    fn plaintext(&self, width: i32, height: i32) -> String {
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                if self.state_at((x, y)) == DEAD {
                    out.push('.');
                } else {
                    out.push('O');
                }
            }
            out.push('\n');
        }
        out
    }
}
