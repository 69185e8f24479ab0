//! Read-modify-write cycle for one product's metafields
//!
//! `load` fetches definitions and stored values concurrently and merges them.
//! `save` reconciles the edit model and issues at most one batch write.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use shared::error::{SyncError, SyncResult};
use shared::metafield::{Reconciliation, merge, reconcile};
use shared::models::{
    AttributeDefinition, AttributeType, AttributeValue, Choice, EditableEntry, FilePage,
    OwnerType, ProductHeader, clamp_file_page_size,
};
use shared::source::{FileSource, MetafieldSource, SetAttributesResult};

use crate::config::DEFAULT_DEFINITIONS_LIMIT;

/// Notice returned when a save had nothing valid to write
pub const NOTHING_TO_SAVE: &str = "No valid metafield values to save. Leave fields blank if you don't want to change them; filled values must match the field type (e.g. boolean: true/false, json: valid JSON).";

/// Separator between remote field rejections in a partial-save message
const USER_ERROR_SEPARATOR: &str = "; ";

/// Product header plus its merged edit model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedRecord {
    pub product: Option<ProductHeader>,
    pub entries: Vec<EditableEntry>,
    /// Declared choices of single-line text definitions, by `namespace.key`
    pub choices: BTreeMap<String, Vec<Choice>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(LoadedRecord),
    Failed(SyncError),
    /// A newer load started (or the session closed) before this one finished
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Every candidate was accepted, or there was nothing to write
    Success {
        values: Vec<AttributeValue>,
        notice: Option<String>,
        rejected: usize,
    },
    /// The remote rejected specific fields; accepted ones are not rolled back
    Partial { message: String, rejected: usize },
    Error(SyncError),
}

/// Gateway between an edit session and a [`MetafieldSource`]
pub struct SyncGateway<S> {
    source: S,
    definitions_limit: u32,
    generation: AtomicU64,
    in_flight: Mutex<CancellationToken>,
}

impl<S: MetafieldSource> SyncGateway<S> {
    pub fn new(source: S) -> Self {
        Self::with_definitions_limit(source, DEFAULT_DEFINITIONS_LIMIT)
    }

    pub fn with_definitions_limit(source: S, definitions_limit: u32) -> Self {
        Self {
            source,
            definitions_limit,
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Abort any in-flight load; its result will be reported as superseded
    pub async fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.in_flight.lock().await.cancel();
    }

    /// Load the edit model for `record_id`
    ///
    /// Starting a load supersedes every earlier one.
    pub async fn load(&self, record_id: &str) -> LoadOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = {
            let mut in_flight = self.in_flight.lock().await;
            in_flight.cancel();
            *in_flight = CancellationToken::new();
            in_flight.clone()
        };

        let record_id = record_id.trim();
        if record_id.is_empty() {
            return LoadOutcome::Failed(SyncError::MissingIdentifier);
        }

        tracing::debug!(record_id, generation, "Loading metafields");

        let fetch = async {
            tokio::try_join!(
                self.source
                    .list_definitions(OwnerType::Product, self.definitions_limit),
                self.source.record_attributes(record_id),
            )
        };

        let result = tokio::select! {
            _ = token.cancelled() => return LoadOutcome::Superseded,
            result = fetch => result,
        };

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(record_id, generation, "Discarding superseded load");
            return LoadOutcome::Superseded;
        }

        match result {
            Ok((definitions, record)) => {
                let entries = merge(&definitions, &record.values);
                tracing::info!(
                    record_id,
                    generation,
                    definitions = definitions.len(),
                    entries = entries.len(),
                    "Metafields loaded"
                );
                LoadOutcome::Loaded(LoadedRecord {
                    product: record.product,
                    entries,
                    choices: text_choices(&definitions),
                })
            }
            Err(e) => {
                tracing::warn!(record_id, generation, error = %e, "Metafield load failed");
                LoadOutcome::Failed(e)
            }
        }
    }

    /// Validate `entries` and write the valid subset for `record_id`
    pub async fn save(&self, record_id: &str, entries: &[EditableEntry]) -> SaveOutcome {
        let record_id = record_id.trim();
        if record_id.is_empty() {
            return SaveOutcome::Error(SyncError::MissingIdentifier);
        }

        let batch = match reconcile(entries, record_id) {
            Reconciliation::NoOp { rejected_count } => {
                tracing::info!(record_id, rejected = rejected_count, "Nothing to save");
                return SaveOutcome::Success {
                    values: Vec::new(),
                    notice: Some(NOTHING_TO_SAVE.to_string()),
                    rejected: rejected_count,
                };
            }
            Reconciliation::Write(batch) => batch,
        };

        let rejected = batch.rejected_count;
        tracing::info!(
            record_id,
            candidates = batch.candidates.len(),
            rejected,
            "Saving metafields"
        );

        match self.source.set_attributes(&batch.candidates).await {
            Err(e) => {
                tracing::warn!(record_id, error = %e, "Metafield save failed");
                SaveOutcome::Error(e)
            }
            Ok(SetAttributesResult {
                accepted,
                user_errors,
            }) => {
                if user_errors.is_empty() {
                    SaveOutcome::Success {
                        values: accepted,
                        notice: None,
                        rejected,
                    }
                } else {
                    let message = user_errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>()
                        .join(USER_ERROR_SEPARATOR);
                    tracing::warn!(record_id, message = %message, "Metafield save partially rejected");
                    SaveOutcome::Partial { message, rejected }
                }
            }
        }
    }
}

fn text_choices(definitions: &[AttributeDefinition]) -> BTreeMap<String, Vec<Choice>> {
    definitions
        .iter()
        .filter(|d| d.ty == AttributeType::Text)
        .filter_map(|d| Some((d.identity(), d.choices()?)))
        .collect()
}

impl<S: MetafieldSource + FileSource> SyncGateway<S> {
    /// One page of files for a file reference picker
    pub async fn list_files(&self, first: Option<u32>, after: Option<&str>) -> SyncResult<FilePage> {
        let first = clamp_file_page_size(first);
        let after = after.filter(|a| !a.is_empty());
        self.source.list_files(first, after).await
    }
}
