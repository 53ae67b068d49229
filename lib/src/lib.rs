mod automaton;
mod cells;
mod config;
mod error;
mod event;
mod index;
mod layer;
pub mod pattern;
pub mod render;
pub mod rules;
mod traits;
mod world;

pub use automaton::{Automaton, Status};
pub use cells::{Coord, LifeCell, State, ALIVE, DEAD};
pub use config::Config;
pub use error::Error;
pub use event::{Event, EventKind, Subscription};
pub use index::{Index, Limit};
pub use layer::{Geometry, Renderable};
pub use pattern::{CellSeed, Pattern};
pub use render::{Clock, Color, Palette, Surface};
pub use rules::{Life, Rule};
pub use traits::Engine;
pub use world::World;
