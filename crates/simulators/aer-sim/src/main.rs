use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use aer_core::metrics::LogMetrics;
use aer_input::tagged::read_tagged_log;

use crate::simulation::builder::SimulationBuilder;
use crate::simulation::report::{comparison_lines, print_lines, summary_lines};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

pub(crate) mod simulation;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Replaces the seed given in the configuration file.
    #[arg(short = 's', long, value_name = "SEED")]
    seed: Option<u64>,

    /// Tagged log of an external simulator run to compare the metrics against.
    #[arg(short = 'l', long, value_name = "SIMULATOR_LOG")]
    compare_log: Option<PathBuf>,
}

fn run(args: &CliArgs) -> Result<(), Box<dyn Error>> {
    let mut builder = SimulationBuilder::new(&args.config)?;
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let simulation = builder.build()?;
    let run = simulation.run()?;
    builder.results()?.write_run(&run)?;

    println!("Scenario {}", builder.scenario());
    print_lines(&summary_lines(run.metrics()));

    if let Some(log_file) = &args.compare_log {
        let external = read_tagged_log(log_file)?.summary();
        let simulated = LogMetrics::from(run.metrics());
        print_lines(&comparison_lines(&simulated, &external));
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    match run(&args) {
        Ok(()) => {
            println!("Simulation finished in {} ms.", start.elapsed().as_millis());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Simulation failed: {}", e);
            eprintln!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
