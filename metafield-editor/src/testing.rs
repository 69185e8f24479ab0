//! In-memory shop for unit tests

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use shared::error::{SyncError, SyncResult};
use shared::models::{
    AttributeDefinition, AttributeType, AttributeValue, FilePage, OwnerType, ProductHeader,
    ReferenceKind, WriteCandidate,
};
use shared::source::{
    FileSource, MetafieldSource, RecordAttributes, ResourcePicker, SetAttributesResult, UserError,
};

#[derive(Default)]
pub struct FakeShop {
    definitions: Vec<AttributeDefinition>,
    values: Mutex<HashMap<String, Vec<AttributeValue>>>,
    delays: HashMap<String, u64>,
    definitions_error: Option<SyncError>,
    values_error: Option<SyncError>,
    write_error: Option<SyncError>,
    user_errors: Vec<UserError>,
    calls: AtomicUsize,
    writes: AtomicUsize,
    written_values: Mutex<Vec<String>>,
    file_requests: Mutex<Vec<(u32, Option<String>)>>,
}

impl FakeShop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition(mut self, definition: AttributeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    pub fn with_value(
        self,
        record_id: &str,
        namespace: &str,
        key: &str,
        value: &str,
        ty: AttributeType,
    ) -> Self {
        let stored = AttributeValue {
            id: Some(format!("gid://shopify/Metafield/{namespace}.{key}")),
            namespace: namespace.into(),
            key: key.into(),
            raw_value: value.into(),
            ty,
        };
        self.values
            .lock()
            .unwrap()
            .entry(record_id.to_string())
            .or_default()
            .push(stored);
        self
    }

    pub fn delay_record(mut self, record_id: &str, millis: u64) -> Self {
        self.delays.insert(record_id.to_string(), millis);
        self
    }

    pub fn fail_definitions(mut self, err: SyncError) -> Self {
        self.definitions_error = Some(err);
        self
    }

    pub fn fail_values(mut self, err: SyncError) -> Self {
        self.values_error = Some(err);
        self
    }

    pub fn fail_writes(mut self, err: SyncError) -> Self {
        self.write_error = Some(err);
        self
    }

    pub fn reject_with(mut self, user_errors: Vec<UserError>) -> Self {
        self.user_errors = user_errors;
        self
    }

    /// Remote calls of any kind
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Values of every candidate sent to `set_attributes`, in order
    pub fn written_values(&self) -> Vec<String> {
        self.written_values.lock().unwrap().clone()
    }

    pub fn file_requests(&self) -> Vec<(u32, Option<String>)> {
        self.file_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetafieldSource for FakeShop {
    async fn list_definitions(
        &self,
        _owner_type: OwnerType,
        _limit: u32,
    ) -> SyncResult<Vec<AttributeDefinition>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.definitions_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.definitions.clone()),
        }
    }

    async fn record_attributes(&self, record_id: &str) -> SyncResult<RecordAttributes> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(millis) = self.delays.get(record_id) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        if let Some(err) = &self.values_error {
            return Err(err.clone());
        }
        let values = self
            .values
            .lock()
            .unwrap()
            .get(record_id)
            .cloned()
            .unwrap_or_default();
        Ok(RecordAttributes {
            product: Some(ProductHeader {
                id: record_id.to_string(),
                title: "Linen shirt".into(),
            }),
            values,
        })
    }

    async fn set_attributes(
        &self,
        candidates: &[WriteCandidate],
    ) -> SyncResult<SetAttributesResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.written_values
            .lock()
            .unwrap()
            .extend(candidates.iter().map(|c| c.value.clone()));
        if let Some(err) = &self.write_error {
            return Err(err.clone());
        }
        if !self.user_errors.is_empty() {
            return Ok(SetAttributesResult {
                accepted: Vec::new(),
                user_errors: self.user_errors.clone(),
            });
        }

        let accepted: Vec<AttributeValue> = candidates
            .iter()
            .map(|c| AttributeValue {
                id: Some(format!("gid://shopify/Metafield/{}.{}", c.namespace, c.key)),
                namespace: c.namespace.clone(),
                key: c.key.clone(),
                raw_value: c.value.clone(),
                ty: c.ty.clone(),
            })
            .collect();

        let mut values = self.values.lock().unwrap();
        for (candidate, value) in candidates.iter().zip(&accepted) {
            let stored = values.entry(candidate.owner_id.clone()).or_default();
            stored.retain(|v| v.identity() != value.identity());
            stored.push(value.clone());
        }

        Ok(SetAttributesResult {
            accepted,
            user_errors: Vec::new(),
        })
    }
}

#[async_trait]
impl FileSource for FakeShop {
    async fn list_files(&self, first: u32, after: Option<&str>) -> SyncResult<FilePage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.file_requests
            .lock()
            .unwrap()
            .push((first, after.map(str::to_string)));
        Ok(FilePage::default())
    }
}

/// Picker that always returns the same selection
pub struct FixedPicker(pub Option<String>);

#[async_trait]
impl ResourcePicker for FixedPicker {
    async fn pick(&self, kind: ReferenceKind) -> Option<String> {
        self.0
            .as_ref()
            .map(|id| format!("gid://shopify/{}/{id}", capitalize(kind.resource_type())))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
