//! Playback duration formatting
//!
//! Provides consistent duration display formatting across the Signcast
//! modules: clock style (`M:SS`) for individual assets and total style
//! (`Xm Ys`) for playlist aggregates.

/// Default display duration for still images (seconds)
pub const DEFAULT_IMAGE_DURATION_SECS: u32 = 10;

/// Images with an intrinsic duration under this are bumped to the default
pub const MIN_IMAGE_DURATION_SECS: u32 = 5;

/// Placeholder shown for assets without a known duration
pub const NO_DURATION_PLACEHOLDER: &str = "—";

/// Format seconds in clock style, `M:SS`.
///
/// Minutes are not zero-padded; seconds always are.
///
/// # Examples
///
/// ```
/// use signcast_common::duration::format_clock;
///
/// assert_eq!(format_clock(0), "0:00");
/// assert_eq!(format_clock(59), "0:59");
/// assert_eq!(format_clock(125), "2:05");
/// assert_eq!(format_clock(600), "10:00");
/// ```
pub fn format_clock(seconds: u32) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", minutes, secs)
}

/// Format optional seconds in clock style, an em dash when unknown.
///
/// Zero counts as unknown: assets report no duration as either absent or 0.
pub fn format_clock_opt(seconds: Option<u32>) -> String {
    match seconds {
        Some(s) if s > 0 => format_clock(s),
        _ => NO_DURATION_PLACEHOLDER.to_string(),
    }
}

/// Format an aggregate duration in total style, `Xm Ys`.
///
/// # Examples
///
/// ```
/// use signcast_common::duration::format_total;
///
/// assert_eq!(format_total(0), "0m 0s");
/// assert_eq!(format_total(330), "5m 30s");
/// assert_eq!(format_total(3600), "60m 0s");
/// ```
pub fn format_total(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}m {}s", minutes, seconds)
}
