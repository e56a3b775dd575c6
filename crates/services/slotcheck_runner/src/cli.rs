use clap::Parser;
use slotcheck_config::SmokeConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slotcheck")]
#[command(about = "End-to-end smoke test for the booking API")]
#[command(
    long_about = "Reserves a free slot, opens its cancellation page, cancels the \
appointment and checks that the slot is free again. The exit code tells which \
stage failed: 2 transport, 3 slot listing, 4 create, 5 missing cancel token, \
6 cancel page, 7 cancel, 8 slot re-fetch, 9 slot still reserved."
)]
pub struct Args {
    /// Base URL all API paths are resolved against
    #[arg(long)]
    pub base_url: String,

    /// Slot to book, e.g. /api/slots/2 (skips slot discovery)
    #[arg(long)]
    pub slot_id: Option<String>,

    /// Configuration file (defaults to an optional slotcheck.* in the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds, overrides the configuration
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Applies command line overrides on top of the loaded configuration.
    pub fn apply_to(&self, mut config: SmokeConfig) -> SmokeConfig {
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        config
    }
}
