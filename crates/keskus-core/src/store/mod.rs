//! Owned extraction data store.
//!
//! The store is the single source of truth for the page dataset. It loads
//! from its backend once when opened and writes back on every mutation.

pub mod backend;

use crate::error::KeskusError;
use crate::model::{ExtractionRow, PageExtractionDataset};
use backend::KeyValueStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DATASET_KEY: &str = "extractedPageData";
pub const RESPONSE_KEY: &str = "extractionResult";
pub const UPLOADED_FILE_KEY: &str = "uploadedPDF";

/// Upper bound on rows per page accepted by [`ExtractionStore::set_row`].
pub const MAX_PAGE_ROWS: usize = 10_000;

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(0);

pub struct ExtractionStore<S: KeyValueStore> {
    id: u64,
    backend: S,
    dataset: PageExtractionDataset,
    version: u64,
}

impl<S: KeyValueStore> ExtractionStore<S> {
    /// Open a store, loading any persisted dataset.
    ///
    /// A persisted dataset that fails to parse is logged and replaced by an
    /// empty one; only backend read failures are errors.
    pub fn open(backend: S) -> Result<Self, KeskusError> {
        let dataset = match backend.get(DATASET_KEY)? {
            Some(json) => match serde_json::from_str(&json) {
                Ok(dataset) => dataset,
                Err(e) => {
                    tracing::warn!(
                        backend = backend.backend_name(),
                        "failed to parse stored extraction data: {e}"
                    );
                    PageExtractionDataset::new()
                }
            },
            None => PageExtractionDataset::new(),
        };

        tracing::debug!(
            backend = backend.backend_name(),
            pages = dataset.page_count(),
            rows = dataset.row_count(),
            "opened extraction store"
        );

        Ok(ExtractionStore {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            backend,
            dataset,
            version: 0,
        })
    }

    pub fn get(&self) -> &PageExtractionDataset {
        &self.dataset
    }

    /// Owned copy of the current dataset.
    pub fn snapshot(&self) -> PageExtractionDataset {
        self.dataset.clone()
    }

    /// Incremented on every mutation; used to memoize derived data.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Process-unique id of this store instance.
    pub fn instance_id(&self) -> u64 {
        self.id
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn set_all(&mut self, dataset: PageExtractionDataset) -> Result<(), KeskusError> {
        self.commit(dataset)
    }

    pub fn set_page(
        &mut self,
        page_index: usize,
        rows: Vec<ExtractionRow>,
    ) -> Result<(), KeskusError> {
        let mut next = self.dataset.clone();
        next.insert_page(page_index, rows);
        self.commit(next)
    }

    /// Replace one row. Writing past the end of a page pads the gap with
    /// empty rows, which never materialize as devices.
    ///
    /// Row indexes at or beyond [`MAX_PAGE_ROWS`] are rejected.
    pub fn set_row(
        &mut self,
        page_index: usize,
        row_index: usize,
        row: ExtractionRow,
    ) -> Result<(), KeskusError> {
        if row_index >= MAX_PAGE_ROWS {
            return Err(KeskusError::RowOutOfRange {
                page: page_index,
                row: row_index,
                limit: MAX_PAGE_ROWS,
            });
        }

        let mut next = self.dataset.clone();
        let page = next.page_mut(page_index);
        if row_index < page.len() {
            page[row_index] = row;
        } else {
            page.resize_with(row_index, ExtractionRow::default);
            page.push(row);
        }
        self.commit(next)
    }

    /// Rows of one page; empty when the page does not exist.
    pub fn get_page(&self, page_index: usize) -> &[ExtractionRow] {
        self.dataset.page(page_index).unwrap_or(&[])
    }

    pub fn get_row(&self, page_index: usize, row_index: usize) -> Option<&ExtractionRow> {
        self.dataset.page(page_index)?.get(row_index)
    }

    /// Persist the raw extraction-service response as received.
    pub fn save_raw_response(&mut self, json: &str) -> Result<(), KeskusError> {
        self.backend.set(RESPONSE_KEY, json)
    }

    pub fn raw_response(&self) -> Result<Option<String>, KeskusError> {
        self.backend.get(RESPONSE_KEY)
    }

    /// Persist the uploaded file as a base64 data URL.
    pub fn save_uploaded_file(&mut self, mime: &str, bytes: &[u8]) -> Result<(), KeskusError> {
        self.backend.set(UPLOADED_FILE_KEY, &encode_data_url(mime, bytes))
    }

    pub fn uploaded_file(&self) -> Result<Option<Vec<u8>>, KeskusError> {
        match self.backend.get(UPLOADED_FILE_KEY)? {
            Some(url) => decode_data_url(&url)
                .map(Some)
                .ok_or_else(|| KeskusError::Storage {
                    key: UPLOADED_FILE_KEY.to_string(),
                    reason: "stored value is not a base64 data URL".into(),
                }),
            None => Ok(None),
        }
    }

    /// Drop all persisted state and start from an empty dataset.
    pub fn clear(&mut self) -> Result<(), KeskusError> {
        self.backend.remove(DATASET_KEY)?;
        self.dataset = PageExtractionDataset::new();
        self.version += 1;

        self.backend.remove(RESPONSE_KEY)?;
        self.backend.remove(UPLOADED_FILE_KEY)
    }

    /// Persist `next` and only then make it the current dataset, so a failed
    /// write leaves memory matching the backend.
    fn commit(&mut self, next: PageExtractionDataset) -> Result<(), KeskusError> {
        let json = serde_json::to_string(&next)?;
        self.backend.set(DATASET_KEY, &json)?;
        self.dataset = next;
        self.version += 1;
        Ok(())
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    STANDARD.decode(payload).ok()
}

#[cfg(test)]
mod tests {
    use super::backend::{FileStore, MemoryStore};
    use super::*;

    fn row(nro: &str) -> ExtractionRow {
        ExtractionRow {
            nro: nro.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_empty_backend() {
        let store = ExtractionStore::open(MemoryStore::new()).unwrap();
        assert!(store.get().is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_corrupt_persisted_data_starts_empty() {
        let mut backend = MemoryStore::new();
        backend.set(DATASET_KEY, "{not json").unwrap();
        let store = ExtractionStore::open(backend).unwrap();
        assert!(store.get().is_empty());
    }

    #[test]
    fn test_mutations_are_persisted() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.set_page(0, vec![row("1"), row("2")]).unwrap();

        let saved = store.backend().get(DATASET_KEY).unwrap().unwrap();
        let reloaded: PageExtractionDataset = serde_json::from_str(&saved).unwrap();
        assert_eq!(&reloaded, store.get());
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_set_row_replaces_in_place() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.set_page(1, vec![row("1"), row("2")]).unwrap();
        store.set_row(1, 1, row("20")).unwrap();
        assert_eq!(store.get_page(1).len(), 2);
        assert_eq!(store.get_row(1, 1).unwrap().nro, "20");
    }

    #[test]
    fn test_set_row_pads_with_empty_rows() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.set_row(2, 3, row("7")).unwrap();

        let page = store.get_page(2);
        assert_eq!(page.len(), 4);
        assert!(page[..3].iter().all(|r| !r.is_present()));
        assert_eq!(page[3].nro, "7");
    }

    #[test]
    fn test_absent_page_and_row() {
        let store = ExtractionStore::open(MemoryStore::new()).unwrap();
        assert!(store.get_page(5).is_empty());
        assert!(store.get_row(5, 0).is_none());
    }

    #[test]
    fn test_set_all_replaces_everything() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.set_page(0, vec![row("1")]).unwrap();
        let replacement: PageExtractionDataset = [(3, vec![row("9")])].into_iter().collect();
        store.set_all(replacement.clone()).unwrap();
        assert_eq!(store.snapshot(), replacement);
        assert!(store.get_page(0).is_empty());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let mut store = ExtractionStore::open(FileStore::new(tmp.path())).unwrap();
            store.set_row(0, 0, row("42")).unwrap();
        }
        let store = ExtractionStore::open(FileStore::new(tmp.path())).unwrap();
        assert_eq!(store.get_row(0, 0).unwrap().nro, "42");
    }

    #[test]
    fn test_uploaded_file_roundtrip() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.save_uploaded_file("application/pdf", b"%PDF-1.7").unwrap();
        let stored = store.backend().get(UPLOADED_FILE_KEY).unwrap().unwrap();
        assert!(stored.starts_with("data:application/pdf;base64,"));
        assert_eq!(store.uploaded_file().unwrap().unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_clear_removes_persisted_state() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        store.set_page(0, vec![row("1")]).unwrap();
        store.save_raw_response("{}").unwrap();
        store.clear().unwrap();
        assert!(store.get().is_empty());
        assert_eq!(store.raw_response().unwrap(), None);
        assert_eq!(store.backend().get(DATASET_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_row_rejects_index_past_limit() {
        let mut store = ExtractionStore::open(MemoryStore::new()).unwrap();
        let err = store.set_row(0, usize::MAX, row("1")).unwrap_err();
        assert!(matches!(
            err,
            KeskusError::RowOutOfRange { page: 0, row: usize::MAX, limit: MAX_PAGE_ROWS }
        ));
        assert!(store.set_row(0, MAX_PAGE_ROWS, row("1")).is_err());
        assert!(store.get().is_empty());
        assert_eq!(store.version(), 0);

        store.set_row(0, MAX_PAGE_ROWS - 1, row("1")).unwrap();
        assert_eq!(store.get_page(0).len(), MAX_PAGE_ROWS);
    }

    /// Memory backend that refuses every write to one key.
    struct RefusingStore {
        inner: MemoryStore,
        refused: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> Result<Option<String>, KeskusError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), KeskusError> {
            if key == self.refused {
                return Err(KeskusError::Storage {
                    key: key.to_string(),
                    reason: "disk full".into(),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), KeskusError> {
            if key == self.refused {
                return Err(KeskusError::Storage {
                    key: key.to_string(),
                    reason: "read-only".into(),
                });
            }
            self.inner.remove(key)
        }

        fn backend_name(&self) -> &str {
            "refusing"
        }
    }

    #[test]
    fn test_failed_write_leaves_dataset_unchanged() {
        let mut inner = MemoryStore::new();
        let seeded: PageExtractionDataset = [(0, vec![row("1")])].into_iter().collect();
        inner
            .set(DATASET_KEY, &serde_json::to_string(&seeded).unwrap())
            .unwrap();
        let mut store = ExtractionStore::open(RefusingStore {
            inner,
            refused: DATASET_KEY,
        })
        .unwrap();

        let replacement: PageExtractionDataset = [(4, vec![row("9")])].into_iter().collect();
        assert!(store.set_all(replacement).is_err());
        assert!(store.set_page(0, vec![row("2")]).is_err());
        assert!(store.set_row(0, 3, row("3")).is_err());
        assert!(store.clear().is_err());

        assert_eq!(store.get(), &seeded);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        assert!(decode_data_url("hello").is_none());
        assert!(decode_data_url("data:text/plain,hello").is_none());
    }
}
