//! Interview clock formatting.

use std::time::Duration;

/// Format elapsed interview time as `m:ss`.
///
/// Minutes are unbounded and unpadded; seconds are always two digits.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;
    format!("{minutes}:{seconds:02}")
}
