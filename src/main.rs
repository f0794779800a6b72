use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use secret_monitor::cli::Cli;
use secret_monitor::clock::SystemClock;
use secret_monitor::{logging, AppContext, Error, GraphClient, RunSettings, SecretMonitor};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let settings = RunSettings::load(cli.config.as_deref(), cli.overrides())?;
    let ctx = AppContext::builder()
        .with_settings(settings)
        .with_clock(&SystemClock)
        .build()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;

    let report = runtime.block_on(async {
        let directory = GraphClient::new(ctx.settings()).map_err(Error::Client)?;
        SecretMonitor::new(directory).run(&ctx).await
    })?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(report.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(Error::Output)
}
