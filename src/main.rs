use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use scheduling_comparison::{
    config::{self, parse_process_arg, ConfigError, RawProcess, RawWorkload},
    scheduler::{compare, report, Algorithm, ResultViewer, SchedulerError, Workload},
};
use std::{fmt, io, path::PathBuf, process::ExitCode};

/// Compare CPU scheduling algorithms over a fixed set of processes.
#[derive(Parser, Debug)]
#[command(name = "sched-compare", version)]
#[command(about = "Compare FCFS, SJF, SRTF and Round Robin scheduling")]
struct Cli {
    /// Workload file, JSON (`.json`) or `n`, `arrival burst` pairs, `quantum`.
    #[arg(short, long, conflicts_with = "process")]
    input: Option<PathBuf>,

    /// A process as ARRIVAL:BURST; repeat in id order.
    #[arg(short, long = "process", value_parser = parse_process_arg)]
    process: Vec<RawProcess>,

    /// Round Robin time quantum, overrides the one in the input.
    #[arg(short, long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Algorithm to run; `all` runs the four and compares them.
    #[arg(short, long, default_value = "all")]
    algorithm: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Run the four algorithms on separate threads.
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Tui,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("Report error: {0}")]
    Report(#[from] fmt::Error),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(cli: &Cli) -> Result<Workload, ConfigError> {
    let raw = if let Some(path) = &cli.input {
        config::load_file(path)?
    } else if !cli.process.is_empty() {
        RawWorkload {
            processes: cli.process.clone(),
            quantum: None,
        }
    } else {
        info!("reading workload from standard input");
        config::read_tokens(io::stdin().lock())?
    };
    raw.into_workload(cli.quantum)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let workload = load(&cli)?;
    let (results, comparison) = if cli.algorithm.eq_ignore_ascii_case("all") {
        let comparison = compare(&workload, cli.parallel)?;
        (comparison.results().to_vec(), Some(comparison))
    } else {
        let algorithm: Algorithm = cli.algorithm.parse()?;
        let result = algorithm.run(&workload)?;
        (vec![result], None)
    };

    match cli.format {
        Format::Text => print!(
            "{}",
            report::full_report(&results, comparison.as_ref(), workload.quantum())?
        ),
        Format::Json => println!("{}", report::json_report(&results, comparison.as_ref())?),
        Format::Tui => {
            let mut viewer = ResultViewer::new(results, comparison)?;
            while viewer.run()? {}
        }
    }
    Ok(())
}
