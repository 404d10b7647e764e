use anyhow::Result;
use clap::Parser;
use tracing::error;

use hacktivity::utils::{setup_logging, validate_args};
use hacktivity::{plot_activity, print_run_summary, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    validate_args(&args)?;

    match plot_activity(&args) {
        Ok(summary) => {
            print_run_summary(&summary);
            Ok(())
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
