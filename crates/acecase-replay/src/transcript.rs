//! Transcript loading and replay.
//!
//! A transcript is a file of raw data-channel payloads, one per line.
//! Lines are passed to the dispatcher as bytes, so a recording that
//! captured invalid UTF-8 replays exactly as the client saw it.

use std::path::{Path, PathBuf};

use acecase_core::SessionDispatcher;

/// Errors that can occur while replaying.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// The transcript could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The transcript path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The final session could not be rendered.
    #[error("failed to render session: {0}")]
    Render(#[from] serde_json::Error),
}

/// Split a transcript into payloads, dropping blank lines and `\r`.
pub fn payloads(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(|b| *b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
}

/// Feed every payload through a fresh dispatcher.
pub fn replay(bytes: &[u8]) -> SessionDispatcher {
    let mut dispatcher = SessionDispatcher::new();
    for payload in payloads(bytes) {
        dispatcher.on_data(payload);
    }
    dispatcher
}

/// Read and replay the transcript at `path`.
pub fn replay_file(path: &Path) -> Result<SessionDispatcher, ReplayError> {
    let bytes = std::fs::read(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(replay(&bytes))
}
