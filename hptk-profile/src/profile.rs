//! Profile assembly
//!
//! Builds one [`ProfileRecord`] per uploaded profile file. `.olp` files are
//! overlays and carry `INTER-PROFILE` blocks; everything else is a normal
//! profile carrying the list of `PLAY-MEDIA-CLIP` track ids.

use serde::Serialize;
use std::path::Path;
use tracing::debug;

use crate::extract::{extract_all_attributes, extract_attribute};
use crate::format::{
    day_of_week_label, format_packed_date_time_at, format_packed_time, parse_day_code, DayLabel,
    FormattedDate,
};
use crate::scan::{extract_blocks, extract_repeated_attribute, parse_frequency_ranges, FrequencyRange};
use crate::NOT_AVAILABLE;

/// File extension that marks an overlay profile
pub const OVERLAY_EXTENSION: &str = "olp";

const MEDIA_CLIP_TAG: &str = "MEDIA-CLIP";
const INFO_TAG: &str = "INFO";
const PLAY_MEDIA_CLIP_TAG: &str = "PLAY-MEDIA-CLIP";
const INTER_PROFILE_TAG: &str = "INTER-PROFILE";
const UID_ATTR: &str = "UID";
const RANDOM_ORDER_ATTR: &str = "RANDOM-ORDER";

// INFO keys, preferred spelling first. Older exports use the hyphenated
// or abbreviated forms.
const NAME_KEYS: &[&str] = &["NAME"];
const IN_DATE_KEYS: &[&str] = &["INDATE"];
const OUT_DATE_KEYS: &[&str] = &["OUTDATE"];
const START_TIME_KEYS: &[&str] = &["StartTime", "START-TIME"];
const FINISH_TIME_KEYS: &[&str] = &["FinishTime", "FINISH-TIME"];
const CREATE_DATE_KEYS: &[&str] = &["CreateDate", "CREATE-DATE"];
const DAY_OF_WEEK_KEYS: &[&str] = &["DayOfWeek", "DAY"];

/// One `INTER-PROFILE` block of an overlay profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayBlock {
    pub uid: String,
    pub frequency_ranges: Vec<FrequencyRange>,
    /// The matched span as it appeared in the file
    pub raw_text: String,
}

impl OverlayBlock {
    fn from_span(span: String) -> Self {
        Self {
            uid: extract_all_attributes(&span, INTER_PROFILE_TAG)
                .get_ignore_case(UID_ATTR)
                .filter(|v| !v.is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            frequency_ranges: parse_frequency_ranges(&span),
            raw_text: span,
        }
    }
}

/// Structured view of one profile file
///
/// Either overlay-shaped (`overlay_blocks` populated, `track_ids` empty) or
/// normal-shaped (the reverse). Date fields are classified once, against
/// the clock at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub file_name: String,
    pub is_overlay: bool,
    pub clip_id: String,
    pub clip_random_order: String,
    pub name: String,
    pub start_time: String,
    pub finish_time: String,
    pub day_of_week: DayLabel,
    pub in_date: FormattedDate,
    pub out_date: FormattedDate,
    pub create_date: FormattedDate,
    pub track_ids: Vec<String>,
    pub track_count: usize,
    pub overlay_blocks: Vec<OverlayBlock>,
}

/// True when `file_name` has the overlay extension, in any case
pub fn is_overlay_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(OVERLAY_EXTENSION))
}

/// Parse a profile file, classifying dates against the current local time
pub fn parse_profile(text: &str, file_name: &str) -> ProfileRecord {
    parse_profile_at(text, file_name, hptk_common::time::local_now())
}

/// Parse a profile file, classifying dates against `now`
pub fn parse_profile_at(text: &str, file_name: &str, now: chrono::NaiveDateTime) -> ProfileRecord {
    let is_overlay = is_overlay_file(file_name);
    let info = extract_all_attributes(text, INFO_TAG);
    let info_value = |keys: &[&str]| {
        info.get_any(keys)
            .unwrap_or(NOT_AVAILABLE)
            .to_string()
    };

    let day_code = info
        .get_any(DAY_OF_WEEK_KEYS)
        .map(parse_day_code)
        .unwrap_or(0);

    let (track_ids, overlay_blocks) = if is_overlay {
        let blocks: Vec<OverlayBlock> = extract_blocks(text, INTER_PROFILE_TAG)
            .into_iter()
            .map(OverlayBlock::from_span)
            .collect();
        (Vec::new(), blocks)
    } else {
        (
            extract_repeated_attribute(text, PLAY_MEDIA_CLIP_TAG, UID_ATTR),
            Vec::new(),
        )
    };

    let record = ProfileRecord {
        file_name: file_name.to_string(),
        is_overlay,
        clip_id: extract_attribute(text, MEDIA_CLIP_TAG, UID_ATTR),
        clip_random_order: extract_attribute(text, MEDIA_CLIP_TAG, RANDOM_ORDER_ATTR),
        name: info_value(NAME_KEYS),
        start_time: format_packed_time(&info_value(START_TIME_KEYS)),
        finish_time: format_packed_time(&info_value(FINISH_TIME_KEYS)),
        day_of_week: day_of_week_label(day_code),
        in_date: format_packed_date_time_at(&info_value(IN_DATE_KEYS), now),
        out_date: format_packed_date_time_at(&info_value(OUT_DATE_KEYS), now),
        create_date: format_packed_date_time_at(&info_value(CREATE_DATE_KEYS), now),
        track_count: track_ids.len(),
        track_ids,
        overlay_blocks,
    };

    debug!(
        file = %record.file_name,
        overlay = record.is_overlay,
        tracks = record.track_count,
        blocks = record.overlay_blocks.len(),
        "Parsed profile"
    );

    record
}

/// Parsed profiles split the way the viewer shows them
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBatch {
    pub normal: Vec<ProfileRecord>,
    pub overlays: Vec<ProfileRecord>,
    pub normal_count: usize,
    pub overlay_count: usize,
}

impl ProfileBatch {
    /// Partition records, keeping their relative order
    pub fn from_records(records: impl IntoIterator<Item = ProfileRecord>) -> Self {
        let (overlays, normal): (Vec<_>, Vec<_>) =
            records.into_iter().partition(|r| r.is_overlay);

        Self {
            normal_count: normal.len(),
            overlay_count: overlays.len(),
            normal,
            overlays,
        }
    }
}
