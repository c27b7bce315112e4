/// smoothloop - seamless crossfade loops for WAV samples
use anyhow::Context;
use clap::Parser;
use smoothloop_cli::{
    cli::{Cli, COPYRIGHT_NOTICE},
    logging, AppConfig, BatchProcessor,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.copyright {
        println!("{COPYRIGHT_NOTICE}");
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("smoothloop: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file was processed
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let mut config =
        AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_to(&mut config);
    config.validate()?;

    logging::init(config.verbosity)?;

    let processor = BatchProcessor::new(&config)?;
    let report = processor.run(&cli.files);
    Ok(report.is_success())
}
