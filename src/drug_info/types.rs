//! Types for the drug-info endpoint

use serde::{Deserialize, Serialize};

/// Request body sent to the drug-info endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugInfoRequest<'a> {
    pub drug_name: &'a str,
}

/// Free-text description of a drug.
///
/// The text is untrusted plain text; newlines are meaningful line breaks.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrugDetails {
    #[serde(default)]
    pub details: String,
}

impl DrugDetails {
    pub fn new(details: &str) -> Self {
        Self {
            details: details.to_string(),
        }
    }

    /// Lines as they should be displayed
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.details.lines()
    }

    /// Escaped HTML with `<br />` line breaks
    pub fn to_html(&self) -> String {
        self.lines().map(escape_html).collect::<Vec<_>>().join("<br />")
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
