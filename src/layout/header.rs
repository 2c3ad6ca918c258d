//! Header strings rendered above events.

use chrono::{Datelike, Duration};

use crate::layout::segment::Event;

pub const ALBUM_DATE_FONT_SIZE: f64 = 70.0;
pub const ALBUM_TIME_FONT_SIZE: f64 = 50.0;
pub const TIMELINE_FONT_SIZE: f64 = 40.0;

/// Height reserved for one header line.
pub const HEADER_HEIGHT: f64 = 30.0;

/// `"Saturday, May 1"`, with the year appended for the first event of the album.
pub fn album_date_header(event: &Event) -> String {
    let format = if event.first {
        "%A, %b %-d, %Y"
    } else {
        "%A, %b %-d"
    };
    event.start_time.format(format).to_string()
}

/// Start hour of the event, e.g. `"10:00"` for an event starting at 10:15.
pub fn album_time_header(event: &Event) -> String {
    event.start_time.format("%H:00").to_string()
}

/// `"Sat, May 1   10:15   2 hours"`; the year is shown only outside `current_year`
/// and the duration only for events spanning at least a minute.
pub fn timeline_header(event: &Event, current_year: i32) -> String {
    let mut format = String::from("%a, %b %-d");
    if event.start_time.year() != current_year {
        format.push_str(", %Y");
    }
    format.push_str("   %H:%M");
    let mut header = event.start_time.format(&format).to_string();

    let duration = event.duration();
    if duration >= Duration::minutes(1) {
        header.push_str("   ");
        header.push_str(&format_largest_unit(duration));
    }
    header
}

/// Human-readable duration truncated to its largest non-zero unit.
pub fn format_largest_unit(duration: Duration) -> String {
    const UNITS: &[(&str, i64)] = &[
        ("year", 365 * 24 * 3600),
        ("week", 7 * 24 * 3600),
        ("day", 24 * 3600),
        ("hour", 3600),
        ("minute", 60),
        ("second", 1),
    ];
    let secs = duration.num_seconds().abs();
    for (name, unit) in UNITS {
        let n = secs / unit;
        if n > 0 {
            return if n == 1 {
                format!("1 {name}")
            } else {
                format!("{n} {name}s")
            };
        }
    }
    "0 seconds".to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/header.rs"]
mod tests;
