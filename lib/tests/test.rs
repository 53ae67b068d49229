use rautomata_lib::{
    pattern::{self, CellSeed},
    Automaton, Clock, Color, Config, Coord, Engine, Error, Index, Life, Surface, World, ALIVE,
    DEAD,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Records every draw call instead of drawing.
#[derive(Default)]
struct Recorder {
    cells: Vec<(i32, i32, Option<Color>)>,
    texts: Vec<String>,
    clears: usize,
}

impl Surface for Recorder {
    fn draw_cell(&mut self, x: i32, y: i32, _size_px: u32, color: Option<Color>) {
        self.cells.push((x, y, color));
    }

    fn draw_line(&mut self, _from: (i32, i32), _to: (i32, i32), _color: Color) {}

    fn draw_text(&mut self, _x: i32, _y: i32, text: &str, _color: Color) {
        self.texts.push(text.to_string());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

/// Counts callback requests instead of scheduling them.
#[derive(Default)]
struct CountingClock {
    requests: usize,
}

impl Clock for CountingClock {
    fn request(&mut self) {
        self.requests += 1;
    }

    fn request_after(&mut self, _delay: Duration) {
        self.requests += 1;
    }
}

fn sorted_live<E: Engine>(engine: &E) -> Vec<Coord> {
    let mut live = engine.live_cells();
    live.sort_unstable();
    live
}

#[test]
fn block_is_a_still_life() {
    let mut world = World::new(10, 10);
    world.load(&pattern::by_name("block").unwrap()).unwrap();
    let before = sorted_live(&world);
    let rule = Life::conway();
    assert_eq!(world.step(&rule), 0);
    assert_eq!(sorted_live(&world), before);
}

#[test]
fn blinker_oscillates_with_period_2() {
    let mut world = World::new(5, 5);
    world.load(&pattern::blinker()).unwrap();
    let vertical = sorted_live(&world);
    assert_eq!(vertical, vec![(1, 0), (1, 1), (1, 2)]);

    let rule = Life::conway();
    world.step(&rule);
    assert_eq!(sorted_live(&world), vec![(0, 1), (1, 1), (2, 1)]);
    world.step(&rule);
    assert_eq!(sorted_live(&world), vertical);
}

#[test]
fn dense_and_sparse_agree_on_a_glider() {
    let mut world = World::new(20, 20);
    let mut index = Index::new();
    world.load(&pattern::glider()).unwrap();
    index.load(&pattern::glider()).unwrap();

    let rule = Life::conway();
    for _ in 0..16 {
        world.step(&rule);
        index.step(&rule);
        assert_eq!(sorted_live(&world), sorted_live(&index));
    }
}

#[test]
fn stable_pattern_reaches_the_surface_as_zero_cell_draws() {
    let config = Config::default().set_size(10, 10);
    let mut automaton = config.automaton().unwrap();
    automaton.load(&pattern::by_name("block").unwrap()).unwrap();

    let mut surface = Recorder::default();
    // First repaint flushes the initial full redraw.
    automaton.repaint(&mut surface);
    assert!(!surface.cells.is_empty());

    assert!(automaton.step());
    let mut surface = Recorder::default();
    automaton.repaint(&mut surface);
    assert!(surface.cells.is_empty());
    // The generation counter still repaints.
    assert_eq!(surface.texts.len(), 1);
}

#[test]
fn manual_step_is_rejected_while_running() {
    let mut automaton = Config::default().automaton().unwrap();
    let mut clock = CountingClock::default();

    automaton.start(&mut clock);
    assert_eq!(clock.requests, 1);
    assert_eq!(automaton.generation(), 0);
    assert!(!automaton.step());
    assert_eq!(automaton.generation(), 0);

    automaton.pause();
    assert!(automaton.step());
    assert_eq!(automaton.generation(), 1);
}

#[test]
fn each_frame_arms_exactly_one_callback() {
    let mut automaton = Config::default().set_size(10, 10).automaton().unwrap();
    automaton.load(&pattern::blinker()).unwrap();
    let mut clock = CountingClock::default();
    let mut surface = Recorder::default();

    automaton.start(&mut clock);
    automaton.frame(&mut clock, &mut surface);
    automaton.frame(&mut clock, &mut surface);
    assert_eq!(clock.requests, 3);
    assert_eq!(automaton.generation(), 2);

    automaton.pause();
    automaton.frame(&mut clock, &mut surface);
    assert_eq!(clock.requests, 3);
    assert_eq!(automaton.generation(), 2);
}

#[test]
fn resize_with_recovery_keeps_cells_in_bounds() {
    let mut world = World::new(10, 10);
    world
        .load(&[CellSeed::alive(1, 1), CellSeed::alive(8, 8)])
        .unwrap();
    world.resize(5, 5, true);
    assert_eq!(sorted_live(&world), vec![(1, 1)]);

    world.resize(3, 3, false);
    assert!(sorted_live(&world).is_empty());
}

#[test]
fn corner_cell_has_three_neighbors() {
    let world = World::new(5, 5);
    assert_eq!(world.neighbors((0, 0)).len(), 3);
    assert_eq!(world.neighbors((4, 0)).len(), 3);
    assert_eq!(world.neighbors((0, 2)).len(), 5);
    assert_eq!(world.neighbors((2, 2)).len(), 8);
    assert!(world.neighbors((7, 7)).is_empty());
}

#[test]
fn edge_cells_never_wrap_around() {
    // A blinker touching the top edge: with wraparound it would see
    // phantom neighbors from the bottom row and evolve differently.
    let mut world = World::new(5, 5);
    world
        .load(&[
            CellSeed::alive(1, 0),
            CellSeed::alive(2, 0),
            CellSeed::alive(3, 0),
        ])
        .unwrap();
    let rule = Life::conway();
    world.step(&rule);
    assert_eq!(sorted_live(&world), vec![(2, 0), (2, 1)]);
}

#[test]
fn load_order_does_not_change_evolution() {
    let seeds = pattern::by_name("glider").unwrap();
    let mut reversed = seeds.clone();
    reversed.reverse();

    let mut a = World::new(15, 15);
    let mut b = World::new(15, 15);
    a.load(&seeds).unwrap();
    b.load(&reversed).unwrap();

    let rule = Life::conway();
    for _ in 0..10 {
        a.step(&rule);
        b.step(&rule);
        assert_eq!(sorted_live(&a), sorted_live(&b));
    }
}

#[test]
fn out_of_bounds_load_leaves_the_grid_untouched() {
    let mut world = World::new(5, 5);
    let result = world.load(&[CellSeed::alive(1, 1), CellSeed::alive(9, 9)]);
    assert_eq!(result, Err(Error::OutOfBounds((9, 9))));
    assert!(sorted_live(&world).is_empty());
    assert!(world.take_dirty().is_empty());
}

#[test]
fn sparse_blinker_matches_the_dense_one() {
    let mut index = Index::new();
    index.load(&pattern::blinker()).unwrap();
    let rule = Life::conway();
    index.step(&rule);
    assert_eq!(sorted_live(&index), vec![(0, 1), (1, 1), (2, 1)]);
}

#[test]
fn toggle_flips_and_reports_the_new_state() {
    let mut world = World::new(5, 5);
    assert_eq!(world.toggle((2, 2)).unwrap(), ALIVE);
    assert_eq!(world.toggle((2, 2)).unwrap(), DEAD);
    assert!(world.toggle((9, 9)).is_err());
}

#[test]
fn events_reach_subscribed_handlers_only() {
    use rautomata_lib::{Event, EventKind};

    let mut automaton = Config::default().set_size(10, 10).automaton().unwrap();
    let generations = Rc::new(RefCell::new(Vec::new()));
    let cleared = Rc::new(RefCell::new(0));

    let seen = Rc::clone(&generations);
    automaton.subscribe(EventKind::GenerationAdvanced, move |event| {
        if let Event::GenerationAdvanced { generation, .. } = event {
            seen.borrow_mut().push(*generation);
        }
    });
    let count = Rc::clone(&cleared);
    let subscription = automaton.subscribe(EventKind::Cleared, move |_| {
        *count.borrow_mut() += 1;
    });

    automaton.load(&pattern::blinker()).unwrap();
    automaton.step();
    automaton.step();
    automaton.clear();
    assert_eq!(*generations.borrow(), vec![1, 2]);
    assert_eq!(*cleared.borrow(), 1);

    assert!(automaton.unsubscribe(subscription));
    assert!(!automaton.unsubscribe(subscription));
    automaton.clear();
    assert_eq!(*cleared.borrow(), 1);
}

#[test]
fn plaintext_window_shows_the_board() {
    let mut world = World::new(3, 3);
    world.load(&pattern::blinker()).unwrap();
    assert_eq!(world.plaintext(3, 3), ".O.\n.O.\n.O.\n");
}
