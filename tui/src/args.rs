//! Parsing command-line arguments.

use clap::{
    builder::PossibleValuesParser,
    command,
    error::{Error, ErrorKind},
    value_parser, Arg, ArgAction,
};
use rautomata_lib::{pattern, Config, Life, Palette, Pattern};
use std::fs;
use std::path::PathBuf;

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) config: Config,
    pub(crate) pattern: Pattern,
    pub(crate) generations: Option<u64>,
    pub(crate) dump: Option<PathBuf>,
    pub(crate) sparse: bool,
}

fn parse_rule(s: &str) -> Result<String, String> {
    s.parse::<Life>()
        .map(|_| s.to_string())
        .map_err(|e| e.to_string())
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        let matches = command!()
            .long_about(
                "An interactive Game of Life automaton for the terminal\n\
                 \n\
                 Living cells are drawn as colored blocks, two character \
                 cells wide.\n\
                 * Press [space] to start or pause the automaton;\n\
                 * Press [n] to advance a single generation while paused;\n\
                 * Press [c] to clear the board;\n\
                 * Click a cell to toggle it;\n\
                 * Press [q] to quit.\n\
                 \n\
                 With --generations the automaton runs without a TUI and \
                 prints the final board in Plaintext format.\n",
            )
            .arg(
                Arg::new("X")
                    .help("Width of the board")
                    .index(1)
                    .default_value("50")
                    .value_parser(value_parser!(i32).range(1..)),
            )
            .arg(
                Arg::new("Y")
                    .help("Height of the board")
                    .index(2)
                    .default_value("50")
                    .value_parser(value_parser!(i32).range(1..)),
            )
            .arg(
                Arg::new("DELAY")
                    .help("Delay between generations, in milliseconds")
                    .short('d')
                    .long("delay")
                    .default_value("100")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("RULE")
                    .help("Rule of the cellular automaton")
                    .long_help(
                        "Rule of the cellular automaton\n\
                         Life-like rules in B/S notation, e.g. B3/S23 or B36/S23.\n",
                    )
                    .short('r')
                    .long("rule")
                    .default_value("B3/S23")
                    .value_parser(parse_rule),
            )
            .arg(
                Arg::new("PATTERN")
                    .help("Seed pattern from the built-in catalog")
                    .short('p')
                    .long("pattern")
                    .default_value("glider")
                    .value_parser(PossibleValuesParser::new(pattern::names().iter().copied())),
            )
            .arg(
                Arg::new("COLOR")
                    .help("Color of the living cells")
                    .short('c')
                    .long("color")
                    .default_value("black")
                    .value_parser(PossibleValuesParser::new(Palette::names().iter().copied())),
            )
            .arg(
                Arg::new("RANDOM")
                    .help("Seed a random soup with the given density instead of a pattern")
                    .long("random")
                    .value_name("DENSITY")
                    .value_parser(value_parser!(f64))
                    .conflicts_with_all(["PATTERN", "LOAD"]),
            )
            .arg(
                Arg::new("LOAD")
                    .help("Seed from a JSON cell list instead of the catalog")
                    .long("load")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .conflicts_with("PATTERN"),
            )
            .arg(
                Arg::new("GEN")
                    .help("Run for N generations without a TUI and print the result")
                    .short('g')
                    .long("generations")
                    .value_name("N")
                    .value_parser(value_parser!(u64)),
            )
            .arg(
                Arg::new("DUMP")
                    .help("Write the final live cells to FILE as JSON")
                    .long("dump")
                    .value_name("FILE")
                    .value_parser(value_parser!(PathBuf))
                    .requires("GEN"),
            )
            .arg(
                Arg::new("SPARSE")
                    .help("Use the sparse engine instead of the dense grid")
                    .long("sparse")
                    .action(ArgAction::SetTrue),
            )
            .try_get_matches()?;

        let width = *matches.get_one::<i32>("X").unwrap();
        let height = *matches.get_one::<i32>("Y").unwrap();
        let delay = *matches.get_one::<u64>("DELAY").unwrap();
        let rule_string = matches.get_one::<String>("RULE").unwrap().clone();
        let color = matches.get_one::<String>("COLOR").unwrap().clone();

        let config = Config::default()
            .set_size(width, height)
            .set_cell_size(1)
            .set_delay_ms(delay)
            .set_rule_string(rule_string)
            .set_color(color);

        let pattern = if let Some(&density) = matches.get_one::<f64>("RANDOM") {
            if !(0.0..=1.0).contains(&density) {
                return Err(Error::raw(
                    ErrorKind::InvalidValue,
                    "density must be between 0 and 1\n",
                ));
            }
            pattern::random(width, height, density)
        } else if let Some(path) = matches.get_one::<PathBuf>("LOAD") {
            let text = fs::read_to_string(path)
                .map_err(|e| Error::raw(ErrorKind::Io, format!("{}: {}\n", path.display(), e)))?;
            serde_json::from_str(&text)
                .map_err(|e| Error::raw(ErrorKind::InvalidValue, format!("{}\n", e)))?
        } else {
            let name = matches.get_one::<String>("PATTERN").unwrap();
            let seeds = pattern::by_name(name)
                .map_err(|e| Error::raw(ErrorKind::InvalidValue, format!("{}\n", e)))?;
            center(&seeds, width, height)
        };

        Ok(Args {
            config,
            pattern,
            generations: matches.get_one::<u64>("GEN").copied(),
            dump: matches.get_one::<PathBuf>("DUMP").cloned(),
            sparse: matches.get_flag("SPARSE"),
        })
    }
}

/// Translates a catalog pattern to the middle of the board.
fn center(seeds: &[pattern::CellSeed], width: i32, height: i32) -> Pattern {
    let max_x = seeds.iter().map(|seed| seed.x).max().unwrap_or(0);
    let max_y = seeds.iter().map(|seed| seed.y).max().unwrap_or(0);
    let dx = ((width - max_x - 1) / 2).max(0);
    let dy = ((height - max_y - 1) / 2).max(0);
    pattern::translate(seeds, dx, dy)
}
