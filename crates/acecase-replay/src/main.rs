//! Offline replay of a recorded interview data channel.
//!
//! ```text
//! acecase-replay <transcript-file>
//! ```
//!
//! Each line of the transcript is one raw payload. The tool feeds them
//! through the same dispatcher the client uses, prints the final session
//! as pretty JSON on stdout, and logs dispatch counters on stderr.

mod transcript;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::transcript::{ReplayError, replay_file};

/// Replay a data-channel transcript and print the resulting session.
#[derive(Debug, Parser)]
#[command(name = "acecase-replay", version, about, long_about = None)]
struct Args {
    /// File holding one raw payload per line.
    transcript: PathBuf,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the session cannot be
/// rendered.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let dispatcher = replay_file(&args.transcript)?;
    let stats = dispatcher.stats();
    info!(
        transcript = %args.transcript.display(),
        received = stats.received,
        applied = stats.applied,
        deprecated = stats.deprecated,
        ignored = stats.ignored,
        discarded = stats.discarded,
        "replay complete"
    );

    let rendered =
        serde_json::to_string_pretty(dispatcher.session()).map_err(ReplayError::from)?;
    println!("{rendered}");
    Ok(())
}
