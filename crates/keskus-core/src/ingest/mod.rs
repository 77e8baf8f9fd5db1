pub mod response;

use crate::catalog::SymbolCatalog;
use crate::error::KeskusError;
use crate::model::{ExtractionRow, PageExtractionDataset};
use response::{ExtractionResponse, ResponseRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Keep symbol strings the catalog cannot resolve, verbatim, instead of
    /// dropping them. Useful when debugging a new extraction model.
    pub retain_unmapped_symbols: bool,
}

/// A non-fatal problem found while converting a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestWarning {
    pub page_number: usize,
    /// Zero-based position of the row within its page.
    pub row_position: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestOutcome {
    pub dataset: PageExtractionDataset,
    pub warnings: Vec<IngestWarning>,
}

/// Parse a raw service response.
pub fn parse_response(json: &str) -> Result<ExtractionResponse, KeskusError> {
    serde_json::from_str(json).map_err(|e| KeskusError::InvalidResponse(e.to_string()))
}

/// Parse and convert a raw service response in one step.
pub fn ingest_json(
    json: &str,
    catalog: &SymbolCatalog,
    options: &IngestOptions,
) -> Result<IngestOutcome, KeskusError> {
    let response = parse_response(json)?;
    to_dataset(&response, catalog, options)
}

/// Convert a service response into a page dataset.
///
/// Page numbers are one-based in the response and zero-based in the
/// dataset; a page number of zero is rejected. When the same page number
/// appears twice, the later page wins.
pub fn to_dataset(
    response: &ExtractionResponse,
    catalog: &SymbolCatalog,
    options: &IngestOptions,
) -> Result<IngestOutcome, KeskusError> {
    let mut dataset = PageExtractionDataset::new();
    let mut warnings = Vec::new();

    for page in &response.pages {
        let page_index = page.page_number.checked_sub(1).ok_or_else(|| {
            KeskusError::InvalidResponse("page_number must be 1 or greater".into())
        })?;

        let rows = page
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                convert_row(row, page.page_number, position, catalog, options, &mut warnings)
            })
            .collect();

        if dataset.insert_page(page_index, rows).is_some() {
            tracing::warn!(page = page.page_number, "duplicate page in response, keeping the last");
            warnings.push(IngestWarning {
                page_number: page.page_number,
                row_position: 0,
                reason: "duplicate page number, earlier rows replaced".into(),
            });
        }
    }

    tracing::info!(
        pages = dataset.page_count(),
        rows = dataset.row_count(),
        warnings = warnings.len(),
        "converted extraction response"
    );

    Ok(IngestOutcome { dataset, warnings })
}

fn convert_row(
    row: &ResponseRow,
    page_number: usize,
    position: usize,
    catalog: &SymbolCatalog,
    options: &IngestOptions,
    warnings: &mut Vec<IngestWarning>,
) -> ExtractionRow {
    let mut icons = Vec::new();

    for raw in row.symbol_keys() {
        let key = raw.trim();
        if key.is_empty() {
            continue;
        }

        match catalog.resolve(key) {
            Some(symbol) => {
                tracing::debug!("mapped symbol {key:?} -> {:?}", symbol.id);
                icons.push(symbol.id.clone());
            }
            None => {
                tracing::warn!(page = page_number, row = position, "unknown symbol from extractor: {key:?}");
                warnings.push(IngestWarning {
                    page_number,
                    row_position: position,
                    reason: format!("unknown symbol '{key}'"),
                });
                if options.retain_unmapped_symbols {
                    icons.push(key.to_string());
                }
            }
        }
    }

    ExtractionRow {
        icons,
        nro: row
            .row_index
            .as_ref()
            .map(|i| i.to_string())
            .unwrap_or_default(),
        kuvateksti: row.description().to_string(),
        suoja: row.suoja.clone().unwrap_or_default(),
        kaapeli: row.kaapeli.clone().unwrap_or_default(),
    }
}
