use crate::catalog::SymbolCatalog;
use crate::error::KeskusError;
use crate::ingest::response::ExtractionResponse;
use crate::ingest::{parse_response, to_dataset, IngestOptions, IngestOutcome};
use crate::store::backend::KeyValueStore;
use crate::store::ExtractionStore;
use serde::{Deserialize, Serialize};

/// Trait for extraction service backends.
pub trait ExtractionService {
    /// Send a PDF to the service and return its raw JSON response.
    fn extract(&self, file_name: &str, pdf_bytes: &[u8]) -> Result<String, KeskusError>;

    /// Name of this service backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error(String),
}

/// Drives one upload from file bytes to a stored dataset.
pub struct UploadSession<S: KeyValueStore> {
    store: ExtractionStore<S>,
    catalog: SymbolCatalog,
    options: IngestOptions,
    status: UploadStatus,
    last_response: Option<ExtractionResponse>,
}

impl<S: KeyValueStore> UploadSession<S> {
    pub fn new(store: ExtractionStore<S>, catalog: SymbolCatalog, options: IngestOptions) -> Self {
        UploadSession {
            store,
            catalog,
            options,
            status: UploadStatus::Idle,
            last_response: None,
        }
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn last_response(&self) -> Option<&ExtractionResponse> {
        self.last_response.as_ref()
    }

    pub fn store(&self) -> &ExtractionStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ExtractionStore<S> {
        &mut self.store
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    pub fn into_store(self) -> ExtractionStore<S> {
        self.store
    }

    /// Upload a PDF and replace the stored dataset with the extracted rows.
    ///
    /// On failure the status carries the error message and the stored
    /// dataset is left as it was. There is no retry.
    pub fn upload(
        &mut self,
        file_name: &str,
        pdf_bytes: &[u8],
        service: &dyn ExtractionService,
    ) -> Result<IngestOutcome, KeskusError> {
        self.status = UploadStatus::Uploading;
        self.last_response = None;

        tracing::info!(
            file_name,
            size = pdf_bytes.len(),
            backend = service.backend_name(),
            "uploading PDF for extraction"
        );

        match self.run_upload(file_name, pdf_bytes, service) {
            Ok(outcome) => {
                self.status = UploadStatus::Success;
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!("upload of {file_name} failed: {e}");
                self.status = UploadStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    fn run_upload(
        &mut self,
        file_name: &str,
        pdf_bytes: &[u8],
        service: &dyn ExtractionService,
    ) -> Result<IngestOutcome, KeskusError> {
        self.store.save_uploaded_file("application/pdf", pdf_bytes)?;

        let raw = service.extract(file_name, pdf_bytes)?;
        let response = parse_response(&raw)?;
        let outcome = to_dataset(&response, &self.catalog, &self.options)?;

        self.store.save_raw_response(&raw)?;
        self.store.set_all(outcome.dataset.clone())?;
        self.last_response = Some(response);

        Ok(outcome)
    }
}
