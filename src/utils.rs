use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins when set;
/// otherwise `--verbose` selects info-level output and quiet runs only
/// surface warnings.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let timer = LocalTime::new(time::macros::format_description!(
        "[hour]:[minute]:[second]"
    ));

    // Logs go to stderr; stdout is reserved for the run summary.
    // try_init so tests can call this more than once.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(timer)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

pub fn format_number(num: u32) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.width == 0 {
        anyhow::bail!("--width must be greater than 0");
    }

    if args.height == 0 {
        anyhow::bail!("--height must be greater than 0");
    }

    let extension = args
        .output
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    if extension.as_deref() != Some("svg") {
        anyhow::bail!("--output must end in .svg (got '{}')", args.output.display());
    }

    Ok(())
}
