use chrono::{DateTime, Utc};

/// Short relative time for post rows ("just now", "5m", "3h", "2d", "Mar 04")
pub fn format_relative_time(created_at: DateTime<Utc>) -> String {
    format_relative_time_at(created_at, Utc::now())
}

pub fn format_relative_time_at(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (now - created_at).num_seconds();
    if diff < 0 {
        return "just now".to_string();
    }

    match diff {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m", diff / 60),
        3600..=86399 => format!("{}h", diff / 3600),
        86400..=604799 => format!("{}d", diff / 86400),
        _ => created_at.format("%b %d").to_string(),
    }
}

/// Full timestamp for the detail view ("3:05 PM · Mar 4, 2024")
pub fn format_datetime(created_at: DateTime<Utc>) -> String {
    created_at.format("%-I:%M %p · %b %-d, %Y").to_string()
}
