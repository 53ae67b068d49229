//! Patterns: immutable seed lists and the built-in catalog.
//!
//! A pattern is an ordered sequence of [`CellSeed`] records. It is a
//! pure seed list, never mutated after definition; loading one into an
//! engine is additive. Patterns round-trip through serde, which is all
//! the persistence this crate has.

use crate::cells::{Coord, State, ALIVE};
use crate::error::Error;
use rand::{thread_rng, Rng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One seeded cell of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellSeed {
    /// The x-coordinate.
    pub x: i32,
    /// The y-coordinate.
    pub y: i32,
    /// The seeded state. Defaults to [`ALIVE`] when omitted.
    #[cfg_attr(feature = "serde", serde(default = "default_seed_state"))]
    pub state: State,
}

#[cfg(feature = "serde")]
fn default_seed_state() -> State {
    ALIVE
}

impl CellSeed {
    /// A living seed at `(x, y)`.
    #[inline]
    pub const fn alive(x: i32, y: i32) -> Self {
        Self { x, y, state: ALIVE }
    }

    /// The coordinates of the seed.
    #[inline]
    pub const fn coord(&self) -> Coord {
        (self.x, self.y)
    }
}

impl From<Coord> for CellSeed {
    fn from((x, y): Coord) -> Self {
        Self::alive(x, y)
    }
}

/// An immutable, ordered list of seeds.
pub type Pattern = Vec<CellSeed>;

/// Parses a plaintext grid into a pattern.
///
/// `O` marks a living cell, any other non-whitespace character a dead
/// one. Rows map to the y-coordinate, columns to x.
pub fn from_plaintext(text: &str) -> Pattern {
    let mut pattern = Pattern::new();
    for (y, line) in text.lines().enumerate() {
        for (x, c) in line.chars().enumerate() {
            if c == 'O' {
                pattern.push(CellSeed::alive(x as i32, y as i32));
            }
        }
    }
    pattern
}

/// Returns a copy of the pattern shifted by `(dx, dy)`.
pub fn translate(pattern: &[CellSeed], dx: i32, dy: i32) -> Pattern {
    pattern
        .iter()
        .map(|seed| CellSeed {
            x: seed.x + dx,
            y: seed.y + dy,
            state: seed.state,
        })
        .collect()
}

/// The catalog names accepted by [`by_name`].
pub const fn names() -> &'static [&'static str] {
    &[
        "block",
        "blinker",
        "glider",
        "clock",
        "galaxy",
        "pulsar",
        "spacefiller",
        "gosper-glider-gun",
    ]
}

/// Looks a pattern up by its catalog name.
pub fn by_name(name: &str) -> Result<Pattern, Error> {
    match name {
        "block" => Ok(block()),
        "blinker" => Ok(blinker()),
        "glider" => Ok(glider()),
        "clock" => Ok(clock()),
        "galaxy" => Ok(galaxy()),
        "pulsar" => Ok(pulsar()),
        "spacefiller" => Ok(spacefiller()),
        "gosper-glider-gun" => Ok(gosper_glider_gun()),
        _ => Err(Error::UnknownPattern(name.to_string())),
    }
}

/// The 2×2 block, the smallest still life.
pub fn block() -> Pattern {
    from_plaintext(
        "OO\n\
         OO",
    )
}

/// The blinker, a vertical period-2 oscillator.
pub fn blinker() -> Pattern {
    vec![
        CellSeed::alive(1, 0),
        CellSeed::alive(1, 1),
        CellSeed::alive(1, 2),
    ]
}

/// The glider, the smallest spaceship. Travels down-right.
pub fn glider() -> Pattern {
    from_plaintext(
        ".O.\n\
         ..O\n\
         OOO",
    )
}

/// A period-2 oscillator shaped like a clock.
pub fn clock() -> Pattern {
    from_plaintext(
        "......OO....\n\
         ......OO....\n\
         ............\n\
         ....OOOO....\n\
         OO.O....O...\n\
         OO.O.OO.O...\n\
         ...O...OO.OO\n\
         ...O....O.OO\n\
         ....OOOO....\n\
         ............\n\
         ....OO......\n\
         ....OO......",
    )
}

/// Kok's galaxy, a period-8 oscillator.
pub fn galaxy() -> Pattern {
    from_plaintext(
        "OO.OOOOOO\n\
         OO.OOOOOO\n\
         OO.......\n\
         OO.....OO\n\
         OO.....OO\n\
         OO.....OO\n\
         .......OO\n\
         OOOOOO.OO\n\
         OOOOOO.OO",
    )
}

/// The pulsar, a period-3 oscillator.
pub fn pulsar() -> Pattern {
    from_plaintext(
        "..OO.....OO..\n\
         ...OO...OO...\n\
         O..O.O.O.O..O\n\
         OOO.OO.OO.OOO\n\
         .O.O.O.O.O.O.\n\
         ..OOO...OOO..\n\
         .............\n\
         ..OOO...OOO..\n\
         .O.O.O.O.O.O.\n\
         OOO.OO.OO.OOO\n\
         O..O.O.O.O..O\n\
         ...OO...OO...\n\
         ..OO.....OO..",
    )
}

/// Max's spacefiller, which grows without bound.
pub fn spacefiller() -> Pattern {
    from_plaintext(
        "..................O........\n\
         .................OOO.......\n\
         ............OOO....OO......\n\
         ...........O..OOO..O.OO....\n\
         ..........O...O.O..O.O.....\n\
         ..........O....O.O.O.O.OO..\n\
         ............O....O.O...OO..\n\
         OOOO.....O.O....O...O.OOO..\n\
         O...OO.O.OOO.OO.........OO.\n\
         O.....OO.....O.............\n\
         .O..OO.O..O..O.OO..........\n\
         .......O.O.O.O.O.O.....OOOO\n\
         .O..OO.O..O..O..OO.O.OO...O\n\
         O.....OO...O.O.O...OO.....O\n\
         O...OO.O.OO..O..O..O.OO..O.\n\
         OOOO.....O.O.O.O.O.O.......\n\
         ..........OO.O..O..O.OO..O.\n\
         .............O.....OO.....O\n\
         .OO.........OO.OOO.O.OO...O\n\
         ..OOO.O...O....O.O.....OOOO\n\
         ..OO...O.O....O............\n\
         ..OO.O.O.O.O....O..........\n\
         .....O.O..O.O...O..........\n\
         ....OO.O..OOO..O...........\n\
         ......OO....OOO............\n\
         .......OOO.................\n\
         ........O..................",
    )
}

/// Gosper's glider gun, which emits a glider every 30 generations.
pub fn gosper_glider_gun() -> Pattern {
    from_plaintext(
        "........................O...........\n\
         ......................O.O...........\n\
         ............OO......OO............OO\n\
         ...........O...O....OO............OO\n\
         OO........O.....O...OO..............\n\
         OO........O...O.OO....O.O...........\n\
         ..........O.....O.......O...........\n\
         ...........O...O....................\n\
         ............OO......................",
    )
}

/// A uniformly random pattern over a `width` × `height` board.
///
/// Each cell is seeded alive with probability `density`.
pub fn random(width: i32, height: i32, density: f64) -> Pattern {
    let mut rng = thread_rng();
    let mut pattern = Pattern::new();
    for x in 0..width {
        for y in 0..height {
            if rng.gen_bool(density.clamp(0.0, 1.0)) {
                pattern.push(CellSeed::alive(x, y));
            }
        }
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_parses_rows_as_y() {
        let pattern = from_plaintext(".O\nO.");
        assert_eq!(
            pattern,
            vec![CellSeed::alive(1, 0), CellSeed::alive(0, 1)]
        );
    }

    #[test]
    fn catalog_is_complete() {
        for name in names() {
            let pattern = by_name(name).unwrap();
            assert!(!pattern.is_empty(), "{} is empty", name);
        }
        assert!(matches!(
            by_name("france-flag"),
            Err(Error::UnknownPattern(_))
        ));
    }

    #[test]
    fn translate_shifts_every_seed() {
        let shifted = translate(&blinker(), 3, -1);
        assert_eq!(shifted[0].coord(), (4, -1));
        assert_eq!(shifted.len(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn seeds_round_trip_without_state() {
        let json = r#"[{"x":1,"y":2},{"x":3,"y":4,"state":2}]"#;
        let pattern: Pattern = serde_json::from_str(json).unwrap();
        assert_eq!(pattern[0].state, ALIVE);
        assert_eq!(pattern[1].state, State(2));
    }
}
