//! Scanners for repeated elements and nested blocks
//!
//! Both walk the whole text and return matches in document order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extract::{element_span_regex, find_attribute, opening_element_regex, AttributeMap};

static FREQUENCY_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<FREQUENCY-RANGE(\s[^>]*?)?\s*/>").expect("frequency range regex")
});

/// One `<FREQUENCY-RANGE .../>` entry of an overlay block, values as written
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrequencyRange {
    pub frequency: String,
    pub in_date_raw: String,
    pub out_date_raw: String,
    pub start_time_raw: String,
    pub end_time_raw: String,
}

/// Value of `attribute` on every `<element ...>` opening tag, in order.
///
/// The attribute may sit anywhere in the tag. Elements without it, or with
/// an empty value, contribute nothing.
pub fn extract_repeated_attribute(text: &str, element: &str, attribute: &str) -> Vec<String> {
    let Some(re) = opening_element_regex(element) else {
        return Vec::new();
    };

    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|region| find_attribute(region.as_str(), attribute))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every `<block ...> ... </block>` span, verbatim and in order.
///
/// Spans are shortest-match: a block nested inside another block of the
/// same name ends the outer span early.
pub fn extract_blocks(text: &str, block: &str) -> Vec<String> {
    let Some(re) = element_span_regex(block) else {
        return Vec::new();
    };

    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Every self-closing `<FREQUENCY-RANGE .../>` inside one block span
pub fn parse_frequency_ranges(block_span: &str) -> Vec<FrequencyRange> {
    FREQUENCY_RANGE_RE
        .captures_iter(block_span)
        .map(|caps| {
            let attrs = caps
                .get(1)
                .map(|region| AttributeMap::parse(region.as_str()))
                .unwrap_or_default();
            let field = |key: &str| attrs.get_ignore_case(key).unwrap_or_default().to_string();

            FrequencyRange {
                frequency: field("FREQUENCY"),
                in_date_raw: field("INDATE"),
                out_date_raw: field("OUTDATE"),
                start_time_raw: field("STARTTIME"),
                end_time_raw: field("ENDTIME"),
            }
        })
        .collect()
}
