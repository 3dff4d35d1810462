//! Tag and attribute extraction
//!
//! Regex scraping over raw profile text. There is no nesting awareness and
//! no escaping: the first span whose name matches wins, and attribute values
//! run to the next double quote.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::NOT_AVAILABLE;

// key="value" inside an opening element. Names may contain hyphens
// (RANDOM-ORDER) so a name is matched whole, never as a suffix of another.
static ATTRIBUTE_PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][A-Za-z0-9_.:-]*)\s*=\s*"([^"]*)""#).expect("attribute pair regex")
});

/// Attributes of one opening element, in document order
///
/// A repeated key keeps its first position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every `key="value"` pair out of an attribute region
    pub fn parse(region: &str) -> Self {
        let mut map = Self::new();
        for caps in ATTRIBUTE_PAIR_RE.captures_iter(region) {
            map.insert(&caps[1], &caps[2]);
        }
        map
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    /// Exact-case lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Exact-case lookup first, then ASCII case-insensitive
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.get(key).or_else(|| {
            self.entries
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.as_str())
        })
    }

    /// First key from `keys` that is present, matched case-insensitively
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get_ignore_case(k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Regex for an opening element `<name ...>` or `<name .../>`.
///
/// Capture 1 is the attribute region. The name must be followed by
/// whitespace, `/` or `>` so `MEDIA-CLIP` never matches `MEDIA-CLIP-LIST`.
pub(crate) fn opening_element_regex(name: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?i)<{}(\s[^>]*?)?\s*/?>", regex::escape(name))).ok()
}

/// Regex for a whole `<name ...> ... </name>` span, shortest content.
///
/// Capture 1 is the opening element's attribute region.
pub(crate) fn element_span_regex(name: &str) -> Option<Regex> {
    let name = regex::escape(name);
    Regex::new(&format!(r"(?is)<{name}(\s[^>]*?)?\s*/?>.*?</{name}\s*>")).ok()
}

/// Value of the first `attribute="..."` in an attribute region, compared
/// case-insensitively
pub(crate) fn find_attribute<'a>(region: &'a str, attribute: &str) -> Option<&'a str> {
    ATTRIBUTE_PAIR_RE
        .captures_iter(region)
        .find(|caps| caps[1].eq_ignore_ascii_case(attribute))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
}

/// Extract one attribute from the first `<tag ...> ... </tag>` span.
///
/// Returns [`NOT_AVAILABLE`] when the span is absent, the attribute is not
/// on the span's opening element, or its value is empty.
pub fn extract_attribute(text: &str, tag: &str, attribute: &str) -> String {
    let Some(re) = element_span_regex(tag) else {
        return NOT_AVAILABLE.to_string();
    };

    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|region| find_attribute(region.as_str(), attribute))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Collect every attribute of the first `<tag ...>` opening element,
/// self-closing or not. Empty when the tag is absent.
pub fn extract_all_attributes(text: &str, tag: &str) -> AttributeMap {
    opening_element_regex(tag)
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|region| AttributeMap::parse(region.as_str()))
        .unwrap_or_default()
}
