//! Human-readable time labels for the elapsed/duration readouts.

/// Format a position in seconds as `m:ss`, or `h:mm:ss` from one hour up.
///
/// Fractional seconds are truncated. Negative and non-finite inputs (a media
/// element reports `NaN` before metadata) render as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }

    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours == 0 {
        format!("{minutes}:{secs:02}")
    } else {
        format!("{hours}:{minutes:02}:{secs:02}")
    }
}
