//! Cellular automata rules.
//!
//! For the notation of rule strings, please see
//! [this article on LifeWiki](https://conwaylife.com/wiki/Rulestring).

use crate::{
    cells::{Coord, State, ALIVE, DEAD},
    error::Error,
    render::{Color, Palette},
};
use ca_rules::ParseLife;
use std::str::FromStr;

/// A cellular automaton rule.
///
/// The rule is pluggable: anything implementing this trait can be
/// substituted without touching the grid or the scheduler. When no
/// rule is configured, the engine falls back to
/// [`Life::conway`] rather than erroring.
pub trait Rule {
    /// Computes the state a cell takes in the next generation.
    ///
    /// `state` is the cell's pre-tick state and `live_neighbors` the
    /// number of its living neighbors, also pre-tick. Neighbors
    /// outside the grid do not exist and are never counted, so a cell
    /// at a grid edge sees fewer than 8 neighbors.
    fn next_state(&self, state: State, live_neighbors: u8) -> State;

    /// The color for a cell, or `None` to erase its area.
    fn color_for(&self, coord: Coord, state: State) -> Option<Color>;
}

/// Totalistic Life-like rules.
///
/// A dead cell becomes alive when its live-neighbor count is in the
/// birth set; a living cell keeps its state when the count is in the
/// survival set and dies otherwise. `B3/S23` is Conway's Game of Life.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Life {
    /// Birth counts.
    b: Vec<u8>,
    /// Survival counts.
    s: Vec<u8>,
    /// How living cells are colored.
    palette: Palette,
}

impl Life {
    /// Constructs a new rule from the `b` and `s` data.
    pub fn new(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self {
            b,
            s,
            palette: Palette::default(),
        }
    }

    /// The original rule of John Conway, `B3/S23`.
    pub fn conway() -> Self {
        Self::new(vec![3], vec![2, 3])
    }

    /// Replaces the palette used by [`Rule::color_for`].
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

impl Default for Life {
    fn default() -> Self {
        Self::conway()
    }
}

impl Rule for Life {
    fn next_state(&self, state: State, live_neighbors: u8) -> State {
        if state == DEAD {
            if self.b.contains(&live_neighbors) {
                ALIVE
            } else {
                DEAD
            }
        } else if self.s.contains(&live_neighbors) {
            // Survival keeps the state unchanged, so colored
            // multi-state variants survive with their color.
            state
        } else {
            DEAD
        }
    }

    fn color_for(&self, coord: Coord, state: State) -> Option<Color> {
        if state.is_alive() {
            Some(self.palette.color(coord))
        } else {
            None
        }
    }
}

impl ParseLife for Life {
    fn from_bs(b: Vec<u8>, s: Vec<u8>) -> Self {
        Self::new(b, s)
    }
}

impl FromStr for Life {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rule: Self = ParseLife::parse_rule(input).map_err(Error::ParseRule)?;
        Ok(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_transitions() {
        let rule = Life::conway();
        assert_eq!(rule.next_state(DEAD, 3), ALIVE);
        assert_eq!(rule.next_state(DEAD, 2), DEAD);
        assert_eq!(rule.next_state(ALIVE, 2), ALIVE);
        assert_eq!(rule.next_state(ALIVE, 3), ALIVE);
        assert_eq!(rule.next_state(ALIVE, 1), DEAD);
        assert_eq!(rule.next_state(ALIVE, 4), DEAD);
    }

    #[test]
    fn survival_keeps_multi_state() {
        let rule = Life::conway();
        assert_eq!(rule.next_state(State(3), 2), State(3));
        assert_eq!(rule.next_state(State(3), 5), DEAD);
    }

    #[test]
    fn parse_rule_string() {
        let rule: Life = "B36/S23".parse().unwrap();
        assert_eq!(rule.next_state(DEAD, 6), ALIVE);
        assert!("B9/S".parse::<Life>().is_err());
    }
}
