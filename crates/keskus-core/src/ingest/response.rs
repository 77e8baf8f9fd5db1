use serde::{Deserialize, Serialize};
use std::fmt;

/// Response body of the extraction service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub pages: Vec<ResponsePage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePage {
    /// One-based page number.
    pub page_number: usize,
    #[serde(default)]
    pub rows: Vec<ResponseRow>,
}

/// One extracted row. Unknown fields (e.g. `symbol_scores`) are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseRow {
    #[serde(default)]
    pub row_index: Option<RowIndex>,
    /// Description; preferred over `kuvateksti` when both are present.
    #[serde(default)]
    pub kuvaus: Option<String>,
    #[serde(default)]
    pub kuvateksti: Option<String>,
    #[serde(default)]
    pub suoja: Option<String>,
    #[serde(default)]
    pub kaapeli: Option<String>,
    /// Symbol names or api ids; preferred over `symbol`.
    #[serde(default)]
    pub symbols: Option<Vec<String>>,
    #[serde(default)]
    pub symbol: Option<String>,
}

impl ResponseRow {
    pub fn description(&self) -> &str {
        self.kuvaus
            .as_deref()
            .or(self.kuvateksti.as_deref())
            .unwrap_or("")
    }

    /// Raw symbol strings: the `symbols` list when present, otherwise the
    /// single `symbol`.
    pub fn symbol_keys(&self) -> Vec<&str> {
        match (&self.symbols, &self.symbol) {
            (Some(list), _) => list.iter().map(String::as_str).collect(),
            (None, Some(single)) => vec![single.as_str()],
            (None, None) => Vec::new(),
        }
    }
}

/// The service sends row indices either as numbers or as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowIndex {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::Number(n) => write!(f, "{n}"),
            RowIndex::Text(s) => write!(f, "{s}"),
        }
    }
}
