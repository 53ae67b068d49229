//! Rendering layers.
//!
//! Every layer implements the single [`Renderable`] capability; the
//! automaton composes them in a plain collection and iterates it.
//! There is no inheritance chain: the background grid, the info
//! overlay and the cellular board are independent variant structs.

use crate::{
    cells::Coord,
    error::Error,
    pattern::CellSeed,
    render::{Color, Surface},
    rules::{Life, Rule},
    traits::Engine,
};

/// The pixel geometry shared by all layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Number of horizontal cells.
    pub width: i32,
    /// Number of vertical cells.
    pub height: i32,
    /// The cell size in pixels.
    pub cell_size: u32,
}

impl Geometry {
    /// The board width in pixels.
    pub const fn width_px(&self) -> i32 {
        self.width * self.cell_size as i32
    }

    /// The board height in pixels.
    pub const fn height_px(&self) -> i32 {
        self.height * self.cell_size as i32
    }

    /// Whether a cell coordinate is inside the visible board.
    pub const fn contains(&self, (x, y): Coord) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }
}

/// A renderable layer.
///
/// A layer is redrawn only when it is dirty; `redraw` clears the flag.
pub trait Renderable {
    /// Adapts cached geometry after a resize and marks the layer dirty.
    fn resize(&mut self, geometry: Geometry);

    /// Whether the layer needs a redraw.
    fn is_dirty(&self) -> bool;

    /// Forces a redraw on the next repaint.
    fn mark_dirty(&mut self);

    /// Redraws the layer and clears the dirty flag.
    fn redraw(&mut self, surface: &mut dyn Surface, geometry: Geometry);
}

/// The background layer: a light grid between the cells.
pub struct BackgroundLayer {
    dirty: bool,
}

impl BackgroundLayer {
    pub(crate) fn new() -> Self {
        Self { dirty: true }
    }
}

impl Renderable for BackgroundLayer {
    fn resize(&mut self, _geometry: Geometry) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn redraw(&mut self, surface: &mut dyn Surface, geometry: Geometry) {
        surface.clear();
        let step = geometry.cell_size as i32;
        for x in 1..geometry.width {
            surface.draw_line((x * step, 0), (x * step, geometry.height_px()), Color::GRID);
        }
        for y in 1..geometry.height {
            surface.draw_line((0, y * step), (geometry.width_px(), y * step), Color::GRID);
        }
        self.dirty = false;
    }
}

/// The info overlay: generation counter and frames per second.
pub struct InfoLayer {
    dirty: bool,
    fps: u32,
    generation: u64,
}

impl InfoLayer {
    pub(crate) fn new() -> Self {
        Self {
            dirty: true,
            fps: 0,
            generation: 0,
        }
    }

    /// Updates the FPS readout; dirties the layer only on change.
    pub(crate) fn set_fps(&mut self, fps: u32) {
        if self.fps != fps {
            self.dirty = true;
        }
        self.fps = fps;
    }

    pub(crate) fn set_generation(&mut self, generation: u64) {
        if self.generation != generation {
            self.dirty = true;
        }
        self.generation = generation;
    }
}

impl Renderable for InfoLayer {
    fn resize(&mut self, _geometry: Geometry) {
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn redraw(&mut self, surface: &mut dyn Surface, _geometry: Geometry) {
        let text = format!("Gen: {}  FPS: {}", self.generation, self.fps);
        surface.draw_text(0, 0, &text, Color::BLACK);
        self.dirty = false;
    }
}

/// The cellular layer: the board itself.
///
/// Generic over the engine so the same layer drives the dense
/// [`World`](crate::world::World) or the sparse
/// [`Index`](crate::index::Index).
pub struct CellularLayer<E: Engine> {
    engine: E,
    rule: Box<dyn Rule>,
    dirty: bool,
    /// Redraw every live cell instead of only the dirty ones.
    ///
    /// Set after resizes, when the incremental dirty list no longer
    /// matches what is on the surface.
    full: bool,
}

impl<E: Engine> CellularLayer<E> {
    /// Wraps an engine with the default Conway rule.
    pub(crate) fn new(engine: E) -> Self {
        Self {
            engine,
            rule: Box::new(Life::conway()),
            dirty: true,
            full: true,
        }
    }

    /// Substitutes the transition rule.
    pub(crate) fn set_rule(&mut self, rule: Box<dyn Rule>) {
        self.rule = rule;
        self.full = true;
        self.dirty = true;
    }

    pub(crate) fn rule(&self) -> &dyn Rule {
        self.rule.as_ref()
    }

    pub(crate) fn engine(&self) -> &E {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Loads a pattern, additively. Marks the layer dirty.
    pub(crate) fn load(&mut self, pattern: &[CellSeed]) -> Result<(), Error> {
        self.engine.load(pattern)?;
        self.dirty = true;
        Ok(())
    }

    /// Sets every cell dead. Previously live cells become dirty, so
    /// the next redraw erases them.
    pub(crate) fn clear(&mut self) {
        self.engine.clear();
        self.dirty = true;
    }

    /// Advances the engine one generation.
    ///
    /// Returns the number of cells that changed; the layer is dirtied
    /// only when something did, so a stable pattern reaches the
    /// surface as zero draw calls.
    pub(crate) fn next(&mut self) -> usize {
        let changed = self.engine.step(self.rule.as_ref());
        if changed > 0 {
            self.dirty = true;
        }
        changed
    }
}

impl<E: Engine> Renderable for CellularLayer<E> {
    fn resize(&mut self, _geometry: Geometry) {
        self.dirty = true;
        self.full = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn redraw(&mut self, surface: &mut dyn Surface, geometry: Geometry) {
        let size = geometry.cell_size;
        if self.full {
            // Conservative pass after a resize or rule change: the
            // dirty list is discarded and every live cell is drawn.
            self.engine.take_dirty();
            for coord in self.engine.live_cells() {
                if geometry.contains(coord) {
                    let state = self.engine.state_at(coord);
                    surface.draw_cell(coord.0, coord.1, size, self.rule.color_for(coord, state));
                }
            }
            self.full = false;
        } else {
            for coord in self.engine.take_dirty() {
                if geometry.contains(coord) {
                    let state = self.engine.state_at(coord);
                    surface.draw_cell(coord.0, coord.1, size, self.rule.color_for(coord, state));
                }
            }
        }
        self.dirty = false;
    }
}
