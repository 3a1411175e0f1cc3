use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "roam=warn";
const VERBOSE_DIRECTIVE: &str = "roam=debug";

/// Installs the stderr subscriber. `RUST_LOG` wins over the default level;
/// `--verbose` raises roam's own level to debug on top of either.
pub fn init(verbose: bool) -> Result<()> {
    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    if verbose {
        filter = filter.add_directive(VERBOSE_DIRECTIVE.parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("Failed to initialise logging: {err}"))
}
