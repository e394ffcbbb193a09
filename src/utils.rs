use chrono::{Local, TimeZone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const DATE_FORMAT_TODAY: &str = "Today %H:%M";
const DATE_FORMAT_YESTERDAY: &str = "Yesterday %H:%M";
const DATE_FORMAT_OTHER: &str = "%Y-%m-%d %H:%M";

/// Truncates to at most `max_width` terminal columns, ending in "..." when cut.
/// CJK characters count as two columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Renders a millisecond timestamp relative to the local day.
pub fn format_timestamp(millis: i64) -> String {
    let Some(datetime) = Local.timestamp_millis_opt(millis).single() else {
        return String::from("-");
    };

    let today = Local::now().date_naive();
    let date = datetime.date_naive();

    if date == today {
        datetime.format(DATE_FORMAT_TODAY).to_string()
    } else if date == today - chrono::Duration::days(1) {
        datetime.format(DATE_FORMAT_YESTERDAY).to_string()
    } else {
        datetime.format(DATE_FORMAT_OTHER).to_string()
    }
}
