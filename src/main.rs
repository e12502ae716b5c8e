use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing::{error, info};

use packcheck::cmd::logging::init_logging;
use packcheck::cmd::progress_bar::create_progress_bar;
use packcheck::cmd::Cli;
use packcheck::roundtrip::{SuiteDriver, Tally};
use packcheck::util::errors::AppError;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(tally) => {
            println!("{tally}");
            if tally.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            error!("suite aborted: {e}");
            eprintln!("{}: {e}", "Suite aborted".red());
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Tally, AppError> {
    init_logging(&cli.log_file, &cli.log_level)?;

    let sets = cli.fixture_sets()?;
    let stager = cli.stager()?;
    let tools = cli.tools();
    info!(
        "packer: {}, extractor: {}, fixtures: {}, work dir: {}",
        tools.packer().display(),
        tools.extractor().display(),
        stager.fixture_dir().display(),
        stager.work_root().display()
    );

    let pb = create_progress_bar(sets.len() as u64, "Round-tripping");
    let result = SuiteDriver::new(&stager, &tools)
        .jobs(cli.jobs)
        .progress_bar(pb.clone())
        .run(&sets);
    pb.finish_and_clear();

    result
}
