//! The automaton view and its generation scheduler.

use crate::{
    cells::{Coord, State},
    config::Config,
    error::Error,
    event::{Event, EventKind, Listeners, Subscription},
    index::Index,
    layer::{BackgroundLayer, CellularLayer, Geometry, InfoLayer, Renderable},
    pattern::CellSeed,
    render::{Clock, Surface},
    rules::Rule,
    traits::Engine,
    world::World,
};
use std::time::Instant;

/// Scheduler status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Not running; ticks happen only through [`Automaton::step`].
    Paused,
    /// Running; one tick and redraw per armed frame callback.
    Running,
}

/// The automaton: layered view plus generation scheduler.
///
/// Everything runs single-threaded and cooperatively. A whole tick
/// and its redraw execute synchronously inside one frame callback;
/// suspension happens only between frames, at the [`Clock`] boundary.
/// Pausing stops re-arming the clock — it never interrupts a tick in
/// flight, and a redraw never observes a partially committed
/// generation.
pub struct Automaton<E: Engine = World> {
    config: Config,
    status: Status,
    generation: u64,

    background: BackgroundLayer,
    cellular: CellularLayer<E>,
    info: InfoLayer,

    listeners: Listeners,
    last_frame: Option<Instant>,
}

impl Automaton<World> {
    /// A dense automaton with the extents of `config`.
    pub fn new(config: Config) -> Result<Self, Error> {
        let world = World::new(config.width, config.height);
        Self::with_engine(config, world)
    }
}

impl Automaton<Index> {
    /// A sparse automaton. The config extents only bound the view.
    pub fn new_sparse(config: Config) -> Result<Self, Error> {
        Self::with_engine(config, Index::new())
    }
}

impl<E: Engine> Automaton<E> {
    /// Wraps an engine. The rule and palette are parsed from the
    /// config; an empty rule string keeps the default Conway rule.
    pub fn with_engine(config: Config, engine: E) -> Result<Self, Error> {
        config.validate()?;
        let mut cellular = CellularLayer::new(engine);
        cellular.set_rule(config.rule()?);
        Ok(Self {
            config,
            status: Status::Paused,
            generation: 0,
            background: BackgroundLayer::new(),
            cellular,
            info: InfoLayer::new(),
            listeners: Listeners::default(),
            last_frame: None,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current generation number.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The scheduler status.
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Whether the automaton is running.
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// The simulation engine.
    pub fn engine(&self) -> &E {
        self.cellular.engine()
    }

    /// The pixel geometry of the view.
    pub fn geometry(&self) -> Geometry {
        Geometry {
            width: self.config.width,
            height: self.config.height,
            cell_size: self.config.cell_size,
        }
    }

    /// Registers a handler for one event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        self.listeners.subscribe(kind, handler)
    }

    /// Removes a handler. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    /// The current transition rule.
    pub fn rule(&self) -> &dyn Rule {
        self.cellular.rule()
    }

    /// Substitutes the transition rule.
    pub fn set_rule(&mut self, rule: Box<dyn Rule>) {
        self.cellular.set_rule(rule);
    }

    /// Loads a pattern, additively.
    pub fn load(&mut self, pattern: &[CellSeed]) -> Result<(), Error> {
        self.cellular.load(pattern)?;
        self.listeners.emit(&Event::Loaded {
            cells: pattern.len(),
        });
        Ok(())
    }

    /// Sets every cell dead.
    pub fn clear(&mut self) {
        self.cellular.clear();
        self.listeners.emit(&Event::Cleared);
    }

    /// Flips one cell between dead and alive.
    pub fn toggle(&mut self, coord: Coord) -> Result<State, Error> {
        let state = self.cellular.engine_mut().toggle(coord)?;
        self.cellular.mark_dirty();
        self.listeners.emit(&Event::StateChanged { coord, state });
        Ok(state)
    }

    /// Advances one generation by hand.
    ///
    /// Rejected while the automaton is running — a manual tick is
    /// never interleaved with a scheduled one. Returns whether a tick
    /// actually happened.
    pub fn step(&mut self) -> bool {
        if self.is_running() {
            log::debug!("manual step rejected while running");
            return false;
        }
        self.advance();
        true
    }

    /// One synchronous tick: compute, commit, count.
    fn advance(&mut self) {
        let changed = self.cellular.next();
        self.generation += 1;
        self.info.set_generation(self.generation);
        self.listeners.emit(&Event::GenerationAdvanced {
            generation: self.generation,
            changed,
        });
    }

    /// Starts the automaton and arms the first frame callback.
    ///
    /// Exactly one callback is armed per tick; the presentation layer
    /// answers each request with one call to [`frame`](Self::frame).
    pub fn start(&mut self, clock: &mut dyn Clock) {
        if self.is_running() {
            return;
        }
        log::debug!("starting at generation {}", self.generation);
        self.status = Status::Running;
        self.last_frame = None;
        self.listeners.emit(&Event::Started);
        clock.request();
    }

    /// Pauses the automaton.
    ///
    /// No further frames are armed; the last committed generation
    /// stays visible.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        log::debug!("paused at generation {}", self.generation);
        self.status = Status::Paused;
        self.last_frame = None;
        self.info.set_fps(0);
        self.listeners.emit(&Event::Paused);
    }

    /// One frame callback: tick, redraw, re-arm.
    ///
    /// Called by the presentation layer once per armed request. When
    /// paused this only repaints whatever is dirty.
    pub fn frame(&mut self, clock: &mut dyn Clock, surface: &mut dyn Surface) {
        if !self.is_running() {
            self.repaint(surface);
            return;
        }

        self.advance();

        let now = Instant::now();
        if let Some(last) = self.last_frame.replace(now) {
            let elapsed = now.duration_since(last).as_secs_f64();
            let fps = if elapsed > 0.0 {
                (1.0 / elapsed).round() as u32
            } else {
                0
            };
            self.info.set_fps(fps);
        }

        self.repaint(surface);

        let delay = self.config.delay();
        if delay.is_zero() {
            clock.request();
        } else {
            clock.request_after(delay);
        }
    }

    /// Repaints every dirty layer, bottom to top.
    ///
    /// Redrawing the background clears the surface, so the layers
    /// above are forced to repaint in full.
    pub fn repaint(&mut self, surface: &mut dyn Surface) {
        let geometry = self.geometry();
        if self.background.is_dirty() {
            self.background.redraw(surface, geometry);
            self.cellular.resize(geometry);
            self.info.mark_dirty();
        }
        if self.cellular.is_dirty() {
            self.cellular.redraw(surface, geometry);
        }
        if self.info.is_dirty() {
            self.info.redraw(surface, geometry);
        }
    }

    /// Changes the board extents.
    ///
    /// Runs on the single simulation thread, so it can never race a
    /// tick. With the config's `recover` flag set, dense engines
    /// re-seed surviving in-bounds cells instead of losing them.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.config.width = width.max(0);
        self.config.height = height.max(0);
        let geometry = self.geometry();
        self.resize_engine();
        for layer in self.renderables() {
            layer.resize(geometry);
        }
        self.listeners.emit(&Event::Resized {
            width: self.config.width,
            height: self.config.height,
        });
    }

    /// Forces a full repaint of every layer.
    ///
    /// For presentation layers whose surface was invalidated from the
    /// outside, e.g. a terminal resize.
    pub fn invalidate(&mut self) {
        for layer in self.renderables() {
            layer.mark_dirty();
        }
    }

    /// Changes the cell size in pixels.
    pub fn set_cell_size(&mut self, cell_size: u32) -> Result<(), Error> {
        if cell_size == 0 {
            return Err(Error::NonPositive);
        }
        self.config.cell_size = cell_size;
        let geometry = self.geometry();
        for layer in self.renderables() {
            layer.resize(geometry);
        }
        Ok(())
    }

    /// Changes the inter-generation delay.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.config.delay_ms = delay_ms;
    }

    /// The layers, bottom to top.
    fn renderables(&mut self) -> [&mut dyn Renderable; 3] {
        [&mut self.background, &mut self.cellular, &mut self.info]
    }

    fn resize_engine(&mut self) {
        let (width, height, recover) = (self.config.width, self.config.height, self.config.recover);
        self.cellular.engine_mut().resize_hint(width, height, recover);
    }
}
