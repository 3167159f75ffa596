//! Entry point of the `agency` binary

use agency_cli::{AgencyConfig, Cli};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::parse_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    let config = match AgencyConfig::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };
    agency_cli::logging::init(&config.log);

    let mut stdout = std::io::stdout().lock();
    match agency_cli::run(&cli.invocation, &config, &mut stdout).await {
        Ok(status) => ExitCode::from(status.code()),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}
