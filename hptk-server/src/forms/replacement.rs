//! Replacement request form
//!
//! Turns the support form into the label/value table pasted into
//! replacement emails. The player model is inferred from the serial suffix.

use serde::{Deserialize, Serialize};

pub const TABLE_TITLE: &str = "System Replacement Required";

/// Form fields as submitted. Every field is optional free text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplacementRequest {
    pub accman: String,
    pub site_id: String,
    pub parent: String,
    pub parent_name: String,
    pub child: String,
    /// Player serial number
    pub player_id: String,
    pub model: String,
    pub address: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub label: &'static str,
    pub value: String,
}

/// Rendered replacement table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplacementTable {
    pub title: &'static str,
    pub detected_model: Option<&'static str>,
    pub rows: Vec<TableRow>,
}

/// Player model for a serial number, keyed on its last two characters
pub fn detect_model(serial: &str) -> Option<&'static str> {
    let chars: Vec<char> = serial.chars().collect();
    if chars.len() < 2 {
        return None;
    }
    let suffix: String = chars[chars.len() - 2..].iter().collect();

    match suffix.as_str() {
        "80" => Some("Compact"),
        "57" => Some("KL4-T (Tablet)"),
        "45" | "48" => Some("NUC+ A"),
        "46" => Some("NUC+ V"),
        "72" => Some("NUC+ M"),
        "40" => Some("A-2U / M-2U"),
        "41" | "60" => Some("Dante 6 / Dante 16 / Dante 1U"),
        _ => None,
    }
}

impl ReplacementTable {
    /// Build the table. A model detected from the serial replaces the one
    /// typed in; blank fields are left out.
    pub fn from_request(request: &ReplacementRequest) -> Self {
        let detected_model = detect_model(&request.player_id);
        let model = detected_model
            .map(str::to_string)
            .unwrap_or_else(|| request.model.clone());

        let rows = [
            ("AccMan", &request.accman),
            ("Site ID", &request.site_id),
            ("Parent Entity", &request.parent),
            ("Parent Entity Name", &request.parent_name),
            ("Child Entities", &request.child),
            ("Serial Number", &request.player_id),
            ("Player Model", &model),
            ("Delivery Address", &request.address),
            ("Note", &request.note),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| TableRow {
            label,
            value: value.clone(),
        })
        .collect();

        Self {
            title: TABLE_TITLE,
            detected_model,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Tab-separated rows under the title, for plain-text mail clients
    pub fn to_plain_text(&self) -> String {
        let mut out = String::from(self.title);
        for row in &self.rows {
            out.push('\n');
            out.push_str(row.label);
            out.push('\t');
            out.push_str(&row.value);
        }
        out
    }

    /// Two-column HTML table with a heading row
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<table border=\"1\" cellpadding=\"6\" style=\"border-collapse:collapse\">\
             <thead><tr><th colspan=\"2\">{}</th></tr></thead><tbody>",
            escape_html(self.title)
        );
        for row in &self.rows {
            html.push_str(&format!(
                "<tr><th style=\"text-align:left\">{}</th><td>{}</td></tr>",
                escape_html(row.label),
                escape_html(&row.value).replace('\n', "<br>")
            ));
        }
        html.push_str("</tbody></table>");
        html
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
