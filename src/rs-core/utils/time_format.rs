/// Format a number of seconds as a `m:ss` clock string, minutes being unbounded.
///
/// Fractional seconds are truncated. Negative or non-finite values are displayed as `0:00`.
pub(crate) fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0. {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format the `elapsed / total` label displayed next to the progress bar.
pub(crate) fn format_elapsed(elapsed_sec: f64, total_sec: f64) -> String {
    format!("{} / {}", format_clock(elapsed_sec), format_clock(total_sec))
}
