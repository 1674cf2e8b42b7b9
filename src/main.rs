mod cli;
mod tui;
use crate::cli::{Arguments, Command};
use crate::tui::App;
use anyhow::Context;
use gridsnake::config::Config;
use gridsnake::engine::{Engine, Grid};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    match Command::from_parser(lexopt::Parser::from_env()) {
        Ok(Command::Run(args)) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) if is_broken_pipe(&e) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                eprintln!("gridsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Command::Help) => {
            print!("{}", cli::USAGE);
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("gridsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("gridsnake: {e}");
            eprintln!("Run `gridsnake --help` for usage.");
            ExitCode::from(2)
        }
    }
}

fn run(args: Arguments) -> anyhow::Result<()> {
    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }
    let config = match args.config {
        Some(ref path) => Config::load(path, false),
        None => Config::default_path().and_then(|p| Config::load(&p, true)),
    }
    .context("failed to load configuration")?;
    let mut settings = config.settings().context("invalid configuration")?;
    if args.rows.is_some() || args.cols.is_some() || args.block_size.is_some() {
        let grid = settings.grid;
        settings.grid = Grid::new(
            args.rows.unwrap_or(grid.rows()),
            args.cols.unwrap_or(grid.cols()),
            args.block_size.unwrap_or(grid.block_size()),
        )
        .context("invalid grid dimensions on command line")?;
    }
    log::info!("Starting gridsnake with {settings:?}");
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let engine = Engine::new(settings, rng);
    let terminal = ratatui::init();
    let r = App::new(engine).run(terminal);
    ratatui::restore();
    r.context("terminal I/O failed")
}

/// Send log messages to the file at `path`, since the terminal is taken up by
/// the game.  The level is read from `RUST_LOG`, defaulting to `info`.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to create log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    Ok(())
}

fn is_broken_pipe(e: &anyhow::Error) -> bool {
    e.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::BrokenPipe)
}
