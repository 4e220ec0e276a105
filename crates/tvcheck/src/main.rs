mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use tvcheck_core::{Probe, Verdict};

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => usage_exit(&err),
    };

    init_tracing(cli.verbose);

    let verdict = match run(&cli).await {
        Ok(verdict) => verdict,
        Err(err) => {
            let verdict = err.verdict();
            if cli.verbose > 0 {
                eprintln!("{:?}", miette::Report::new(err));
            }
            verdict
        }
    };

    output::print_output(&output::render_verdict(&cli.output, &verdict));
    std::process::exit(verdict.exit_code());
}

/// Help and version exit normally; any other argument error is an
/// `UNKNOWN` plugin result.
fn usage_exit(err: &clap::Error) -> ! {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        err.exit();
    }

    let _ = err.print();
    let verdict = CliError::from_clap(err).verdict();
    output::print_output(&verdict.message);
    std::process::exit(verdict.exit_code());
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<Verdict, CliError> {
    let path = cli.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&path)?;
    let probe_config = config::resolve(cli, &cfg)?;

    tracing::debug!(
        url = %probe_config.api_url,
        criterion = %probe_config.criterion,
        "running probe"
    );
    Ok(Probe::new(probe_config).run().await?)
}
