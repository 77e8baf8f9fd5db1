use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One physical row on one page, as extracted or edited.
///
/// Field names follow the column headings printed on the diagrams:
/// `nro` is the device number, `kuvateksti` the description, `suoja` the
/// protection rating and `kaapeli` the cable type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRow {
    /// Symbol identifiers (catalog ids) drawn on this row.
    #[serde(default)]
    pub icons: Vec<String>,
    #[serde(default)]
    pub nro: String,
    #[serde(default)]
    pub kuvateksti: String,
    #[serde(default)]
    pub suoja: String,
    #[serde(default)]
    pub kaapeli: String,
}

impl ExtractionRow {
    /// A row is present when any text field is non-empty or it has at least
    /// one icon. Rows that are not present never become devices.
    pub fn is_present(&self) -> bool {
        !self.nro.is_empty()
            || !self.kuvateksti.is_empty()
            || !self.suoja.is_empty()
            || !self.kaapeli.is_empty()
            || !self.icons.is_empty()
    }
}

/// Page index (zero-based) to the ordered rows on that page.
///
/// Backed by a `BTreeMap` so iteration is always in ascending page order,
/// regardless of the order pages were inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageExtractionDataset(BTreeMap<usize, Vec<ExtractionRow>>);

impl PageExtractionDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in ascending page-index order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &[ExtractionRow])> {
        self.0.iter().map(|(index, rows)| (*index, rows.as_slice()))
    }

    pub fn page(&self, index: usize) -> Option<&[ExtractionRow]> {
        self.0.get(&index).map(Vec::as_slice)
    }

    pub(crate) fn page_mut(&mut self, index: usize) -> &mut Vec<ExtractionRow> {
        self.0.entry(index).or_default()
    }

    /// Insert or replace a page, returning the previous rows if any.
    pub fn insert_page(
        &mut self,
        index: usize,
        rows: Vec<ExtractionRow>,
    ) -> Option<Vec<ExtractionRow>> {
        self.0.insert(index, rows)
    }

    pub fn page_count(&self) -> usize {
        self.0.len()
    }

    /// Total number of stored rows, present or not.
    pub fn row_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(usize, Vec<ExtractionRow>)> for PageExtractionDataset {
    fn from_iter<T: IntoIterator<Item = (usize, Vec<ExtractionRow>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A present row materialized during one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRow {
    /// Unique within a single pass only (`page-<index>-row-<counter>`).
    pub id: String,
    /// One-based page number.
    pub page_number: usize,
    pub icons: Vec<String>,
    pub nro: String,
    pub kuvateksti: String,
    pub suoja: String,
    pub kaapeli: String,
}

impl DeviceRow {
    pub(crate) fn from_row(row: &ExtractionRow, page_index: usize, counter: usize) -> Self {
        DeviceRow {
            id: format!("page-{page_index}-row-{counter}"),
            page_number: page_index + 1,
            icons: row.icons.clone(),
            nro: row.nro.clone(),
            kuvateksti: row.kuvateksti.clone(),
            suoja: row.suoja.clone(),
            kaapeli: row.kaapeli.clone(),
        }
    }
}
