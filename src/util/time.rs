//! Human-readable formatting of durations and rates

use std::time::Duration;

/// Format a duration in human-readable form
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flipgen::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
/// assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
/// assert_eq!(format_duration(Duration::from_micros(2500)), "2.50ms");
/// assert_eq!(format_duration(Duration::from_secs(5)), "5.00s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.2}us", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos as f64 / 1_000_000_000.0)
    }
}

/// Format how many events per second `count` over `elapsed` amounts to
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flipgen::util::time::format_rate;
///
/// assert_eq!(format_rate(500, Duration::from_secs(1)), "500/s");
/// assert_eq!(format_rate(3000, Duration::from_secs(2)), "1.50K/s");
/// assert_eq!(format_rate(10, Duration::ZERO), "-");
/// ```
pub fn format_rate(count: u64, elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        return "-".to_string();
    }

    let rate = count as f64 / seconds;
    if rate < 1_000.0 {
        format!("{:.0}/s", rate)
    } else if rate < 1_000_000.0 {
        format!("{:.2}K/s", rate / 1_000.0)
    } else if rate < 1_000_000_000.0 {
        format!("{:.2}M/s", rate / 1_000_000.0)
    } else {
        format!("{:.2}G/s", rate / 1_000_000_000.0)
    }
}
