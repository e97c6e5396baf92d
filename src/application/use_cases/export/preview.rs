use serde::Serialize;

pub const SUMMARY_CARD_LIMIT: usize = 4;

/// Full tabular view of a result, one row per task.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreviewTable {
    pub caption: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn new(caption: &str, headers: &[&str], rows: Vec<Vec<String>>) -> Self {
        Self {
            caption: caption.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CardDetail {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SummaryCard {
    pub heading: String,
    pub meta: String,
    pub details: Vec<CardDetail>,
}

impl SummaryCard {
    pub fn new(heading: String, meta: String, details: &[(&str, &str)]) -> Self {
        Self {
            heading,
            meta,
            details: details
                .iter()
                .map(|(label, value)| CardDetail {
                    label: label.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

/// Abbreviated on-page rendering plus the full table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PagePreview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub cards: Vec<SummaryCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub table: PreviewTable,
}

/// Note shown when cards were cut to [`SUMMARY_CARD_LIMIT`].
pub fn truncation_note(total: usize) -> Option<String> {
    (total > SUMMARY_CARD_LIMIT).then(|| {
        format!(
            "Showing {} of {} rows. Use Preview Table for full data.",
            SUMMARY_CARD_LIMIT, total
        )
    })
}
