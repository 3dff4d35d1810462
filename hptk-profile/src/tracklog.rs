//! DVJ track log extraction
//!
//! Playback logs write one record per line:
//!
//! ```text
//! "01/02/2024 10:00:00" - Start - "{3f2a...}" - "Song Title" - "Artist Name",...
//! ```
//!
//! Only lines containing `Start` are considered. Each line is matched on its
//! own; nothing carries over between lines.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

const START_MARKER: &str = "Start";

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"([^"]+)"\s+-\s+Start"#).expect("timestamp regex"));

static TITLE_ARTIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""\{[^}]+\}"\s+-\s+"([^"]+)"\s+-\s+"([^"]+)""#).expect("title/artist regex")
});

/// One played track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackEntry {
    /// Absent when the line did not open with a quoted timestamp
    pub timestamp: Option<String>,
    pub title: String,
    pub artist: String,
}

impl TrackEntry {
    /// `Title - Artist`
    pub fn simple_line(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }

    /// `Timestamp - Title - Artist`, or `Title - Artist` without a timestamp
    pub fn timestamped_line(&self) -> String {
        match &self.timestamp {
            Some(ts) => format!("{} - {} - {}", ts, self.title, self.artist),
            None => self.simple_line(),
        }
    }
}

/// Tracks extracted from one log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExtractionResult {
    pub file_name: String,
    pub tracks: Vec<TrackEntry>,
    pub track_count: usize,
}

impl LogExtractionResult {
    pub fn new(file_name: impl Into<String>, tracks: Vec<TrackEntry>) -> Self {
        Self {
            file_name: file_name.into(),
            track_count: tracks.len(),
            tracks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// One `Title - Artist` line per track
    pub fn simple_listing(&self) -> String {
        self.tracks
            .iter()
            .map(TrackEntry::simple_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One `Timestamp - Title - Artist` line per track
    pub fn timestamped_listing(&self) -> String {
        self.tracks
            .iter()
            .map(TrackEntry::timestamped_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn parse_line(line: &str) -> Option<TrackEntry> {
    if !line.contains(START_MARKER) {
        return None;
    }

    let caps = TITLE_ARTIST_RE.captures(line)?;
    let timestamp = TIMESTAMP_RE
        .captures(line)
        .map(|ts| ts[1].to_string());

    Some(TrackEntry {
        timestamp,
        title: caps[1].to_string(),
        artist: caps[2].to_string(),
    })
}

/// Extract every started track from a log, in line order
pub fn extract_tracks(log_text: &str) -> Vec<TrackEntry> {
    log_text.lines().filter_map(parse_line).collect()
}

/// Extract tracks and wrap them with the file they came from
pub fn extract_log(log_text: &str, file_name: &str) -> LogExtractionResult {
    let result = LogExtractionResult::new(file_name, extract_tracks(log_text));
    debug!(file = %file_name, tracks = result.track_count, "Extracted track log");
    result
}
