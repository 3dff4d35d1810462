//! # hptk-profile
//!
//! Best-effort scrapers for the two text formats the toolkit reads:
//! - music profile files (`.djv` normal profiles, `.olp` overlays), a
//!   tag/attribute markup that is not well-formed XML
//! - DVJ track logs, one quoted record per line
//!
//! Nothing in this crate returns an error. Unmatched input yields the
//! [`NOT_AVAILABLE`] sentinel or an empty sequence.

pub mod extract;
pub mod format;
pub mod profile;
pub mod scan;
pub mod tracklog;

pub use extract::{extract_all_attributes, extract_attribute, AttributeMap};
pub use format::{
    day_of_week_label, format_packed_date_time, format_packed_date_time_at, format_packed_time,
    DateStatus, DayColor, DayLabel, FormattedDate,
};
pub use profile::{
    is_overlay_file, parse_profile, parse_profile_at, OverlayBlock, ProfileBatch, ProfileRecord,
};
pub use scan::{extract_blocks, extract_repeated_attribute, parse_frequency_ranges, FrequencyRange};
pub use tracklog::{extract_log, extract_tracks, LogExtractionResult, TrackEntry};

/// Sentinel for a value the input did not provide
pub const NOT_AVAILABLE: &str = "N/A";
