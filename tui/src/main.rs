mod args;
mod tui;

use args::Args;
use rautomata_lib::{Automaton, CellSeed, Engine, Pattern};
use std::error::Error;
use std::fs;
use std::process;

fn main() {
    env_logger::init();
    let args = Args::parse().unwrap_or_else(|e| e.exit());
    if let Err(e) = run(args) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.sparse {
        let mut automaton = args.config.clone().automaton_sparse()?;
        automaton.load(&args.pattern)?;
        drive(args, automaton)
    } else {
        let mut automaton = args.config.clone().automaton()?;
        automaton.load(&args.pattern)?;
        drive(args, automaton)
    }
}

fn drive<E: Engine>(args: Args, mut automaton: Automaton<E>) -> Result<(), Box<dyn Error>> {
    match args.generations {
        Some(generations) => {
            for _ in 0..generations {
                automaton.step();
            }
            let (width, height) = (automaton.config().width, automaton.config().height);
            print!("{}", automaton.engine().plaintext(width, height));
            if let Some(path) = &args.dump {
                fs::write(path, serde_json::to_string_pretty(&live_seeds(&automaton))?)?;
            }
            Ok(())
        }
        None => tui::run(automaton).map_err(Into::into),
    }
}

/// The live cells of the final board, row by row.
fn live_seeds<E: Engine>(automaton: &Automaton<E>) -> Pattern {
    let engine = automaton.engine();
    let mut seeds: Pattern = engine
        .live_cells()
        .into_iter()
        .map(|(x, y)| CellSeed {
            x,
            y,
            state: engine.state_at((x, y)),
        })
        .collect();
    seeds.sort_unstable_by_key(|seed| (seed.y, seed.x));
    seeds
}
