//! The sparse index.
//!
//! Tracks only live cells and their penumbra (the neighbors of live
//! cells), so one generation costs time proportional to the living
//! perimeter rather than the total area. Coordinates are unbounded
//! signed integers.

use crate::{
    cells::{Coord, State, DEAD},
    error::Error,
    pattern::CellSeed,
    rules::Rule,
    traits::Engine,
    world::NBHD,
};
use std::collections::HashMap;
use std::mem;

/// The bounding box of the live cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    /// The smallest live x- and y-coordinates.
    pub min: Coord,
    /// The largest live x- and y-coordinates.
    pub max: Coord,
}

/// A sparse, unbounded world holding only live cells.
///
/// Derived data (the [`offset`](Self::offset) candidate map and the
/// [`limit`](Self::limit) bounding box) is computed lazily and cached;
/// any mutation of the live set invalidates both caches.
#[derive(Clone, Debug, Default)]
pub struct Index {
    /// The live cells.
    map: HashMap<Coord, State>,

    /// Insertion order of the live coordinates.
    order: Vec<Coord>,

    /// Cached candidate map: every live cell and every one of its 8
    /// neighbors, annotated with its live-neighbor count.
    offset: Option<HashMap<Coord, u8>>,

    /// Cached bounding box of the live cells.
    limit: Option<Option<Limit>>,

    /// Coordinates whose visual state changed since the last drain.
    dirty: Vec<Coord>,
}

impl Index {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no cell is alive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The state at a coordinate, if it is live.
    #[inline]
    pub fn get_at(&self, coord: Coord) -> Option<State> {
        self.map.get(&coord).copied()
    }

    /// Sets the state of one cell.
    ///
    /// A [`DEAD`] state removes the entry. Invalidates the caches
    /// whenever the live set actually changes.
    pub fn add(&mut self, coord: Coord, state: State) {
        let old = self.get_at(coord).unwrap_or(DEAD);
        if old == state {
            return;
        }
        if state == DEAD {
            self.map.remove(&coord);
            self.order.retain(|&c| c != coord);
        } else {
            if self.map.insert(coord, state).is_none() {
                self.order.push(coord);
            }
        }
        self.dirty.push(coord);
        self.invalidate();
    }

    /// Removes one cell. Returns its state if it was live.
    pub fn remove(&mut self, coord: Coord) -> Option<State> {
        let old = self.get_at(coord);
        if old.is_some() {
            self.add(coord, DEAD);
        }
        old
    }

    /// The live entries, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (Coord, State)> + '_ {
        self.order
            .iter()
            .filter_map(move |&coord| self.map.get(&coord).map(|&state| (coord, state)))
    }

    /// The states of the 8 neighbors of a coordinate.
    ///
    /// Dead (absent) neighbors are `None`.
    pub fn neighbors(&self, (x, y): Coord) -> [Option<State>; 8] {
        let mut states = [None; 8];
        for (i, (dx, dy)) in NBHD.iter().enumerate() {
            states[i] = self.get_at((x + dx, y + dy));
        }
        states
    }

    /// Count of living neighbors of a coordinate.
    pub fn live_neighbors(&self, coord: Coord) -> u8 {
        self.neighbors(coord)
            .iter()
            .filter(|state| state.map_or(false, State::is_alive))
            .count() as u8
    }

    /// The candidate map: every live cell and every one of its 8
    /// neighbors, each annotated with its live-neighbor count.
    ///
    /// This enumerates every cell that could possibly change state in
    /// the next generation; a dead cell with no live neighbor is never
    /// a candidate and is correctly excluded. Computed lazily, cached
    /// until the live set changes.
    pub fn offset(&mut self) -> &HashMap<Coord, u8> {
        if self.offset.is_none() {
            let mut offset: HashMap<Coord, u8> = HashMap::with_capacity(self.map.len() * 3);
            for (&(x, y), _) in self.map.iter() {
                for (dx, dy) in NBHD.iter() {
                    *offset.entry((x + dx, y + dy)).or_insert(0) += 1;
                }
            }
            // A live cell with no live neighbor still is a candidate
            // (it is about to die).
            for &coord in self.map.keys() {
                offset.entry(coord).or_insert(0);
            }
            self.offset = Some(offset);
        }
        self.offset.as_ref().unwrap()
    }

    /// The bounding box of the live cells, or `None` when empty.
    ///
    /// Computed lazily, cached until the live set changes.
    pub fn limit(&mut self) -> Option<Limit> {
        if self.limit.is_none() {
            let limit = if self.map.is_empty() {
                None
            } else {
                let mut min = (i32::MAX, i32::MAX);
                let mut max = (i32::MIN, i32::MIN);
                for &(x, y) in self.map.keys() {
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
                Some(Limit { min, max })
            };
            self.limit = Some(limit);
        }
        self.limit.unwrap()
    }

    /// Drops the derived caches. Called on every live-set mutation.
    fn invalidate(&mut self) {
        self.offset = None;
        self.limit = None;
    }
}

impl Engine for Index {
    fn load(&mut self, pattern: &[CellSeed]) -> Result<(), Error> {
        // No bounds to violate; every coordinate is in range.
        for seed in pattern {
            self.add(seed.coord(), seed.state);
        }
        Ok(())
    }

    fn clear(&mut self) {
        let dead = mem::take(&mut self.order);
        self.dirty.extend(dead);
        self.map.clear();
        self.invalidate();
    }

    fn step(&mut self, rule: &dyn Rule) -> usize {
        // The candidate counts are derived from the pre-tick live set;
        // the new index is built aside and swapped in wholesale, so a
        // candidate never observes another cell's next state.
        let offset = mem::take(self.offset_mut());
        let mut next_map = HashMap::with_capacity(self.map.len());
        let mut next_order = Vec::with_capacity(self.order.len());
        let mut changed = 0;
        for (&coord, &count) in offset.iter() {
            let state = self.get_at(coord).unwrap_or(DEAD);
            let next = rule.next_state(state, count);
            if next != DEAD {
                next_map.insert(coord, next);
                next_order.push(coord);
            }
            if next != state {
                self.dirty.push(coord);
                changed += 1;
            }
        }
        self.map = next_map;
        self.order = next_order;
        self.invalidate();
        changed
    }

    fn state_at(&self, coord: Coord) -> State {
        self.get_at(coord).unwrap_or(DEAD)
    }

    fn toggle(&mut self, coord: Coord) -> Result<State, Error> {
        let state = !self.state_at(coord);
        self.add(coord, state);
        Ok(state)
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.order.clone()
    }

    fn take_dirty(&mut self) -> Vec<Coord> {
        mem::take(&mut self.dirty)
    }
}

impl Index {
    /// Ensures the offset cache is built and returns it mutably.
    fn offset_mut(&mut self) -> &mut HashMap<Coord, u8> {
        self.offset();
        self.offset.as_mut().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::ALIVE;
    use crate::rules::Life;

    #[test]
    fn offset_of_a_single_cell() {
        let mut index = Index::new();
        index.add((0, 0), ALIVE);
        let offset = index.offset().clone();
        assert_eq!(offset.len(), 9);
        assert_eq!(offset[&(0, 0)], 0);
        for (dx, dy) in NBHD.iter() {
            assert_eq!(offset[&(*dx, *dy)], 1);
        }
    }

    #[test]
    fn caches_invalidated_on_mutation() {
        let mut index = Index::new();
        index.add((0, 0), ALIVE);
        assert_eq!(
            index.limit(),
            Some(Limit {
                min: (0, 0),
                max: (0, 0)
            })
        );
        index.add((5, -2), ALIVE);
        assert_eq!(
            index.limit(),
            Some(Limit {
                min: (0, -2),
                max: (5, 0)
            })
        );
        index.clear();
        assert_eq!(index.limit(), None);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut index = Index::new();
        index.add((2, 2), ALIVE);
        index.add((-1, 0), ALIVE);
        index.add((0, 7), ALIVE);
        let coords: Vec<Coord> = index.entries().map(|(coord, _)| coord).collect();
        assert_eq!(coords, vec![(2, 2), (-1, 0), (0, 7)]);
    }

    #[test]
    fn dead_cell_far_from_life_is_not_a_candidate() {
        let mut index = Index::new();
        index.add((0, 0), ALIVE);
        assert!(!index.offset().contains_key(&(10, 10)));
    }

    #[test]
    fn lonely_cell_dies() {
        let mut index = Index::new();
        index.add((3, 3), ALIVE);
        let rule = Life::conway();
        assert_eq!(index.step(&rule), 1);
        assert!(index.is_empty());
    }
}
