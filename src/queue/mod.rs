// Queue helpers - whose turn is it, and how long until it starts
// Timestamps are server seconds (f64), as the queue feed sends them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: u64,
    pub performer_name: String,
    pub session_id: String,
    pub start_time: Option<f64>,
    pub track_duration: f64,
    pub track_id: String,
}

/// Did this browser (or someone using this performer name) queue the item?
pub fn is_my_song(session_id: Option<&str>, performer_name: &str, item: Option<&QueueItem>) -> bool {
    match item {
        Some(item) => {
            session_id == Some(item.session_id.as_str()) || item.performer_name == performer_name
        }
        None => false,
    }
}

/// "In 2 mins", "In 1 min", "In 30 secs" or "Now"; "" when there's no start time
pub fn time_until(now: f64, time: Option<f64>) -> String {
    let Some(time) = time else {
        return String::new();
    };

    let seconds_total = (time - now).floor() as i64;
    let seconds = seconds_total % 60;
    let minutes = seconds_total.div_euclid(60);
    if minutes > 1 {
        format!("In {} mins", minutes)
    } else if minutes == 1 {
        "In 1 min".to_string()
    } else if seconds <= 0 {
        "Now".to_string()
    } else {
        format!("In {} secs", seconds)
    }
}

/// Items still playing or yet to play. A paused queue has no start times,
/// so everything in it counts.
pub fn current_and_future(now: f64, queue: &[QueueItem]) -> Vec<QueueItem> {
    queue
        .iter()
        .filter(|item| match item.start_time {
            None => true,
            Some(start) => start + item.track_duration > now,
        })
        .cloned()
        .collect()
}

/// seconds -> "M:SS"
pub fn s_to_mns(t: f64) -> String {
    let t = t.max(0.0);
    format!("{}:{:02}", (t / 60.0).floor() as u64, (t % 60.0).floor() as u64)
}

/// "2021-01-03T14:00:00" -> "14:00"; unparsable input comes back unchanged
pub fn short_date(long_date: &str) -> String {
    NaiveDateTime::parse_from_str(long_date, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|_| long_date.to_string())
}

/// a / b as a rounded percentage, eg "33%"
pub fn percent(a: f64, b: f64) -> String {
    format!("{}%", ((a / b) * 100.0).round())
}
