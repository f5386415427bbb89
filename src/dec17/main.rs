type Result<T> = std::result::Result<T, anyhow::Error>;

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use rock_tower::jets::JetPattern;
use rock_tower::{Simulation, SimulationConfig};

#[derive(Debug, Parser)]
#[command(about = "Height of the rock tower after many falling shapes")]
struct Args {
    /// Jet pattern file; reads stdin when absent.
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long, default_value_t = 1_000_000_000_000)]
    target: u64,

    #[arg(short, long, default_value_t = 2022)]
    short_target: u64,

    /// Give up when no cycle is found after this many shapes.
    #[arg(short, long, default_value_t = 10_000)]
    cutoff: u64,

    /// Print the top rows of the chamber when done.
    #[arg(short, long)]
    draw: Option<usize>,

    #[arg(short, long)]
    verbose: bool,
}

fn read_input(args: &Args) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read jets from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read jets from stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(log_level)
        .init();

    let buffer = read_input(&args)?;
    let jets: JetPattern = buffer.trim().parse()?;
    log::info!("read {} jets", jets.len());

    let mut simulation = Simulation::new(jets)?;
    let config = SimulationConfig {
        cutoff: args.cutoff,
        min_shapes: args.short_target,
    };
    let cycle = simulation.run(&config)?;

    println!(
        "Tower height after {} blocks dropped: {}",
        args.short_target,
        simulation.height_after(args.short_target, &cycle)?
    );
    println!(
        "Tower height after {} blocks dropped: {}",
        args.target,
        simulation.height_after(args.target, &cycle)?
    );

    if let Some(rows) = args.draw {
        println!("{}", simulation.chamber().render(rows, None));
    }

    Ok(())
}
