use std::process::ExitCode;
use std::str::FromStr;

use bitlife::history::{trailing_period, trim_stable_tail};
use bitlife::{patterns, Bitboard, Board, Life, LifeError, LifeResult};
use clap::Parser;
use log::{error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use simple_logger::SimpleLogger;

/// Run a Game of Life pattern and report how it evolves.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid side length (ignored when the pattern is a cell list)
    #[arg(long, default_value_t = bitlife::DEFAULT_SIDE as usize)]
    side: usize,

    /// Number of generations to compute after the initial one
    #[arg(long, default_value_t = 20)]
    iterations: i64,

    /// Named pattern, "random", or a cell list such as "10:0,1;1,2"
    #[arg(long, default_value = "glider")]
    pattern: String,

    /// Seed for "random"
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Live-cell density for "random"
    #[arg(long, default_value_t = 0.35)]
    fill: f64,

    /// Print every generation as a 0/1 grid
    #[arg(long)]
    print: bool,

    /// Stop at the first repeated generation
    #[arg(long)]
    trim_stable: bool,
}

fn initial_board(args: &Args) -> LifeResult<Board> {
    if args.pattern.contains(':') {
        return Board::from_str(&args.pattern);
    }
    let life = Life::new(args.side)?;
    let grid = match args.pattern.as_str() {
        "random" => life.random(&mut StdRng::seed_from_u64(args.seed), args.fill)?,
        name => patterns::by_name(name)
            .ok_or_else(|| LifeError::InvalidPattern(format!("unknown pattern {:?}", name)))?
            .place(&life, 0, 0)?,
    };
    Ok(life.board(&grid))
}

fn simulate(args: &Args) -> LifeResult<()> {
    let board = initial_board(args)?;
    let life = board.life()?;
    info!(
        "{}x{} grid, {} live cells, {} generations",
        life.side(),
        life.side(),
        life.population(&board.grid()),
        args.iterations
    );

    let gens = life.run(&board.grid(), args.iterations)?;
    let shown: &[Bitboard] = if args.trim_stable {
        trim_stable_tail(&gens)
    } else {
        &gens
    };

    if args.print {
        for (n, grid) in shown.iter().enumerate() {
            println!("generation {}\n{}", n, life.board(grid));
        }
    }

    if let Some(last) = shown.last() {
        info!(
            "stopped after generation {} with {} live cells",
            shown.len() - 1,
            life.population(last)
        );
    }
    match trailing_period(&gens, 8) {
        Some(1) => info!("settled into a still life"),
        Some(p) => info!("settled into a period-{} oscillator", p),
        None => info!("no repetition within the last 8 generations"),
    }
    Ok(())
}

#[cfg_attr(feature = "hotpath", hotpath::main)]
fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("failed to initialise logging: {}", e);
    }

    match simulate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
