use std::fs;
use std::io::{self, Read};
use std::num::NonZero;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colorsplit::{Puzzle, SearchLimits, SolverFailure};

/// Draw a wall from one corner of a grid to another so that every color ends up in a region of its own.
#[derive(Parser, Debug)]
#[command(name = "colorsplit", version, about)]
struct Cli {
    /// Puzzle file: a `row,col` start line, a `row,col` end line, then the grid rows.
    /// Use `-` to read standard input.
    puzzle: PathBuf,

    /// Give up after drawing this many walls in total.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_steps: Option<u64>,

    /// Print the grid before solving.
    #[arg(long)]
    show_grid: bool,
}

fn read_puzzle(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).context("failed to read standard input")?;
        return Ok(text);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    if std::env::var("COLORSPLIT_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("COLORSPLIT_LOG")
            .write_style("COLORSPLIT_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let cli = Cli::parse();
    log::debug!("options: {:?}", cli);

    let text = read_puzzle(&cli.puzzle)?;
    let mut puzzle: Puzzle = text.parse()
        .with_context(|| format!("failed to parse {}", cli.puzzle.display()))?;

    if cli.show_grid {
        print!("{}", puzzle.grid);
    }

    let limits = SearchLimits { max_steps: cli.max_steps.and_then(NonZero::new) };
    match puzzle.solve(limits) {
        Ok(solution) => println!("{solution}"),
        Err(SolverFailure::NoSolution) => println!("No solutions!"),
        Err(failure) => return Err(failure).context("search aborted"),
    }

    Ok(())
}
