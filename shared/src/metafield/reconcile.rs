//! Reconciliation: edit model → validated write batch

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::codec::normalize;
use crate::models::metafield::or_default;
use crate::models::{DEFAULT_KEY, DEFAULT_NAMESPACE, EditableEntry, WriteCandidate};

/// Candidates that passed validation plus the number of dropped entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteBatch {
    pub candidates: Vec<WriteCandidate>,
    pub rejected_count: usize,
}

/// Result of reconciling an edit model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing to write; the caller must not issue a remote call
    NoOp { rejected_count: usize },
    /// Non-empty batch ready for the wire
    Write(WriteBatch),
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp { .. })
    }

    pub fn rejected_count(&self) -> usize {
        match self {
            Self::NoOp { rejected_count } => *rejected_count,
            Self::Write(batch) => batch.rejected_count,
        }
    }

    pub fn candidates(&self) -> &[WriteCandidate] {
        match self {
            Self::NoOp { .. } => &[],
            Self::Write(batch) => &batch.candidates,
        }
    }
}

/// Validate every entry and build the write batch for `owner_id`
///
/// Blank values mean "leave unchanged" and are skipped. Values rejected by
/// the codec are counted and dropped, never written. At most one candidate
/// is written per identity: the first valid entry wins and later ones are
/// counted as rejected.
pub fn reconcile(entries: &[EditableEntry], owner_id: &str) -> Reconciliation {
    let mut candidates = Vec::new();
    let mut written = HashSet::new();
    let mut rejected_count = 0usize;

    for entry in entries {
        match normalize(&entry.value, &entry.ty) {
            Ok(None) => {}
            Ok(Some(value)) => {
                let identity = entry.written_identity();
                if !written.insert(identity.clone()) {
                    tracing::debug!(%identity, "Dropping value for an identity already in the batch");
                    rejected_count += 1;
                    continue;
                }
                candidates.push(WriteCandidate {
                    owner_id: owner_id.to_string(),
                    namespace: or_default(&entry.namespace, DEFAULT_NAMESPACE).to_string(),
                    key: or_default(&entry.key, DEFAULT_KEY).to_string(),
                    value,
                    ty: entry.ty.clone(),
                });
            }
            Err(rejected) => {
                tracing::debug!(
                    namespace = %entry.namespace,
                    key = %entry.key,
                    ty = %rejected.ty,
                    "Dropping value that does not fit its type"
                );
                rejected_count += 1;
            }
        }
    }

    if candidates.is_empty() {
        Reconciliation::NoOp { rejected_count }
    } else {
        Reconciliation::Write(WriteBatch {
            candidates,
            rejected_count,
        })
    }
}

/// Aggregate notice for dropped values; `None` when nothing was dropped
pub fn rejection_notice(rejected_count: usize) -> Option<String> {
    match rejected_count {
        0 => None,
        1 => Some("1 value was not valid for its type and was not saved".to_string()),
        n => Some(format!(
            "{n} values were not valid for their type and were not saved"
        )),
    }
}
