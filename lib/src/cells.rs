//! Cells in the cellular automaton.

use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Possible states of a cell.
///
/// [`State(0)`](DEAD) is the dead state; every other state is a living
/// state. Colored or multi-state rule variants may use states above
/// [`ALIVE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State(pub usize);

/// The Dead state.
pub const DEAD: State = State(0);
/// The Alive state.
pub const ALIVE: State = State(1);

impl State {
    /// Whether the state is a living one.
    #[inline]
    pub const fn is_alive(self) -> bool {
        self.0 != 0
    }
}

/// Flips the state.
///
/// The `not` of any living state is [`DEAD`].
impl Not for State {
    type Output = Self;

    #[inline]
    fn not(self) -> Self::Output {
        match self {
            DEAD => ALIVE,
            _ => DEAD,
        }
    }
}

/// The coordinates of a cell.
///
/// `(x-coordinate, y-coordinate)`. 0-indexed in a dense [`World`],
/// unrestricted signed integers in a sparse [`Index`].
///
/// [`World`]: crate::world::World
/// [`Index`]: crate::index::Index
pub type Coord = (i32, i32);

/// A cell in a dense [`World`](crate::world::World).
///
/// The name `LifeCell` is chosen to avoid ambiguity with
/// [`std::cell::Cell`].
///
/// Holds the current state and, during a generation step, the pending
/// next state. The pending state is written once per generation and
/// cleared as soon as it is committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LifeCell {
    /// The coordinates of the cell.
    pub coord: Coord,

    /// The current state of the cell.
    pub(crate) state: State,

    /// The pending state for the next generation.
    ///
    /// `None` when no step is in flight.
    pub(crate) next: Option<State>,
}

impl LifeCell {
    /// Generates a new dead cell.
    #[inline]
    pub(crate) const fn new(coord: Coord) -> Self {
        Self {
            coord,
            state: DEAD,
            next: None,
        }
    }

    /// The current state of the cell.
    #[inline]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Whether the cell is currently alive.
    #[inline]
    pub const fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    /// The pending state, if a step has computed one.
    #[inline]
    pub const fn next_state(&self) -> Option<State> {
        self.next
    }

    /// Whether the pending state differs from the current one.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.next.map_or(false, |next| next != self.state)
    }

    /// Assigns a state directly, discarding any pending state.
    #[inline]
    pub(crate) fn set_state(&mut self, state: State) {
        self.next = None;
        self.state = state;
    }

    /// Commits the pending state.
    ///
    /// Returns `true` if the state actually changed. The pending state
    /// is always cleared.
    #[inline]
    pub(crate) fn commit(&mut self) -> bool {
        match self.next.take() {
            Some(next) if next != self.state => {
                self.state = next;
                true
            }
            _ => false,
        }
    }
}
