//! Edit session for one product's metafields
//!
//! ```text
//! Idle → Loading → Ready ⇄ Saving
//!           ↘ Failed
//! ```
//!
//! A failed load leaves no entries behind, so stale data is never editable.

use std::collections::BTreeMap;

use serde::Serialize;

use shared::error::SyncError;
use shared::metafield::{encode_list_value, normalize, parse_list_value, rejection_notice};
use shared::models::{
    AttributeType, AttributeValue, Choice, EditableEntry, FilePage, ProductHeader,
};
use shared::source::{FileSource, MetafieldSource, ResourcePicker};
use shared::SyncResult;

use crate::gateway::{LoadOutcome, SaveOutcome, SyncGateway};

/// Shown after a save that wrote everything it was given
pub const SAVED: &str = "Metafields saved";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Saving,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tone", content = "message", rename_all = "lowercase")]
pub enum Banner {
    Success(String),
    Error(String),
}

pub struct EditSession<S> {
    gateway: SyncGateway<S>,
    record_id: Option<String>,
    product: Option<ProductHeader>,
    entries: Vec<EditableEntry>,
    choices: BTreeMap<String, Vec<Choice>>,
    state: SessionState,
    banner: Option<Banner>,
}

impl<S: MetafieldSource> EditSession<S> {
    pub fn new(gateway: SyncGateway<S>) -> Self {
        Self {
            gateway,
            record_id: None,
            product: None,
            entries: Vec::new(),
            choices: BTreeMap::new(),
            state: SessionState::Idle,
            banner: None,
        }
    }

    pub fn gateway(&self) -> &SyncGateway<S> {
        &self.gateway
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn product(&self) -> Option<&ProductHeader> {
        self.product.as_ref()
    }

    pub fn entries(&self) -> &[EditableEntry] {
        &self.entries
    }

    pub fn is_editable(&self) -> bool {
        self.state == SessionState::Ready
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Select a record and load its edit model
    pub async fn open(&mut self, record_id: &str) -> &SessionState {
        self.clear();
        self.record_id = Some(record_id.to_string());
        self.state = SessionState::Loading;

        match self.gateway.load(record_id).await {
            LoadOutcome::Loaded(record) => {
                self.product = record.product;
                self.entries = record.entries;
                self.choices = record.choices;
                self.state = SessionState::Ready;
            }
            LoadOutcome::Failed(err) => {
                self.state = SessionState::Failed(load_message(&err));
            }
            // A newer load owns the session now.
            LoadOutcome::Superseded => {}
        }
        &self.state
    }

    /// Close the edit view, discarding any in-flight load
    pub async fn close(&mut self) {
        self.gateway.cancel().await;
        self.clear();
        self.record_id = None;
        self.state = SessionState::Idle;
    }

    fn clear(&mut self) {
        self.product = None;
        self.entries.clear();
        self.choices.clear();
        self.banner = None;
    }

    /// Write the valid subset of the entries
    ///
    /// Accepted values replace the matching entries' id and value; on any
    /// failure the entries stay exactly as the operator left them.
    pub async fn save(&mut self) -> Option<&Banner> {
        if !self.is_editable() {
            return self.banner.as_ref();
        }
        let Some(record_id) = self.record_id.clone() else {
            self.banner = Some(Banner::Error(SyncError::MissingIdentifier.to_string()));
            return self.banner.as_ref();
        };

        self.state = SessionState::Saving;
        let outcome = self.gateway.save(&record_id, &self.entries).await;
        self.state = SessionState::Ready;

        self.banner = Some(match outcome {
            SaveOutcome::Success {
                values,
                notice,
                rejected,
            } => {
                self.resync(&values);
                let message = [notice, rejection_notice(rejected)]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                Banner::Success(if message.is_empty() {
                    SAVED.to_string()
                } else {
                    message
                })
            }
            SaveOutcome::Partial { message, rejected } => match rejection_notice(rejected) {
                Some(notice) => Banner::Error(format!("{message} ({notice})")),
                None => Banner::Error(message),
            },
            SaveOutcome::Error(err) => Banner::Error(err.to_string()),
        });
        self.banner.as_ref()
    }

    /// Each accepted value goes back to the entry it was written from: the
    /// first one under its identity holding a writable value
    fn resync(&mut self, accepted: &[AttributeValue]) {
        for value in accepted {
            let accepted_identity = value.identity();
            let Some(entry) = self.entries.iter_mut().find(|e| {
                e.written_identity() == accepted_identity
                    && matches!(normalize(&e.value, &e.ty), Ok(Some(_)))
            }) else {
                tracing::debug!(identity = %accepted_identity, "Accepted value has no entry");
                continue;
            };
            entry.id = value.id.clone();
            entry.namespace = value.namespace.clone();
            entry.key = value.key.clone();
            entry.value = value.raw_value.clone();
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Append a blank entry and return its index
    pub fn add_entry(&mut self) -> usize {
        self.entries.push(EditableEntry::blank());
        self.entries.len() - 1
    }

    /// Append a blank entry under `namespace.key`; `None` if that identity is taken
    pub fn add_entry_as(&mut self, namespace: &str, key: &str) -> Option<usize> {
        let mut entry = EditableEntry::blank();
        entry.namespace = namespace.to_string();
        entry.key = key.to_string();
        if self.is_taken(&entry.written_identity(), None) {
            return None;
        }
        self.entries.push(entry);
        Some(self.entries.len() - 1)
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<EditableEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        self.edit(index, |e| e.value = value.into())
    }

    /// Rename the entry's namespace; refused if another entry already has the resulting identity
    pub fn set_namespace(&mut self, index: usize, namespace: impl Into<String>) -> bool {
        self.rename(index, |e| e.namespace = namespace.into())
    }

    /// Rename the entry's key; refused if another entry already has the resulting identity
    pub fn set_key(&mut self, index: usize, key: impl Into<String>) -> bool {
        self.rename(index, |e| e.key = key.into())
    }

    pub fn set_type(&mut self, index: usize, ty: AttributeType) -> bool {
        self.edit(index, |e| e.ty = ty)
    }

    /// Items of a list-typed entry
    pub fn list_items(&self, index: usize) -> Vec<String> {
        self.entries
            .get(index)
            .map(|e| parse_list_value(&e.value))
            .unwrap_or_default()
    }

    pub fn set_list_items<T: AsRef<str>>(&mut self, index: usize, items: &[T]) -> bool {
        let value = encode_list_value(items);
        self.edit(index, |e| e.value = value)
    }

    /// Declared choices for a single-line text entry
    pub fn choices(&self, index: usize) -> Option<&[Choice]> {
        let entry = self.entries.get(index)?;
        if entry.ty != AttributeType::Text {
            return None;
        }
        self.choices.get(&entry.identity()).map(Vec::as_slice)
    }

    /// Ask the host picker for a product/collection/variant reference
    ///
    /// Returns `false` when the entry is not a resource reference or nothing was picked.
    pub async fn pick_reference<P: ResourcePicker + ?Sized>(
        &mut self,
        index: usize,
        picker: &P,
    ) -> bool {
        let Some(kind) = self.entries.get(index).and_then(|e| {
            e.ty.item_type().unwrap_or(&e.ty).reference_kind()
        }) else {
            return false;
        };
        match picker.pick(kind).await {
            Some(id) => self.apply_reference(index, &id),
            None => false,
        }
    }

    /// Store a picked resource or file id: replaces a single reference,
    /// appends to a list of references
    pub fn apply_reference(&mut self, index: usize, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        let item = entry.ty.item_type().unwrap_or(&entry.ty);
        if !entry.ty.is_file_reference() && item.reference_kind().is_none() {
            return false;
        }
        if entry.ty.is_list() {
            let mut items = parse_list_value(&entry.value);
            if !items.iter().any(|item| item == id) {
                items.push(id.to_string());
            }
            entry.value = encode_list_value(&items);
        } else {
            entry.value = id.to_string();
        }
        true
    }

    fn rename(&mut self, index: usize, f: impl FnOnce(&mut EditableEntry)) -> bool {
        let Some(mut renamed) = self.entries.get(index).cloned() else {
            return false;
        };
        f(&mut renamed);
        if self.is_taken(&renamed.written_identity(), Some(index)) {
            tracing::debug!(identity = %renamed.written_identity(), "Identity already in use");
            return false;
        }
        self.entries[index] = renamed;
        true
    }

    fn is_taken(&self, written_identity: &str, except: Option<usize>) -> bool {
        self.entries
            .iter()
            .enumerate()
            .any(|(i, e)| Some(i) != except && e.written_identity() == written_identity)
    }

    fn edit(&mut self, index: usize, f: impl FnOnce(&mut EditableEntry)) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }
}

impl<S: MetafieldSource + FileSource> EditSession<S> {
    /// Files offered for a file reference entry
    pub async fn files(&self, first: Option<u32>, after: Option<&str>) -> SyncResult<FilePage> {
        self.gateway.list_files(first, after).await
    }
}

/// The error's own message, or its code's default when it has none
fn load_message(err: &SyncError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        err.code().message().to_string()
    } else {
        message
    }
}
