//! Metafield reconciliation pipeline
//!
//! - [`normalize`]: per-type validation of one value
//! - [`merge`]: definitions + stored values → edit model
//! - [`reconcile`]: edit model → validated write batch
//!
//! Everything here is pure; remote calls live behind [`crate::source`].

mod codec;
mod list;
mod merge;
mod reconcile;

pub use codec::{Rejected, normalize};
pub use list::{encode_list_value, parse_list_value};
pub use merge::merge;
pub use reconcile::{Reconciliation, WriteBatch, reconcile, rejection_notice};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttributeDefinition, AttributeType, WriteCandidate};

    #[test]
    fn test_defined_unvalued_entry_becomes_candidate() {
        let defs = vec![AttributeDefinition::new(
            "custom",
            "color",
            "Color",
            AttributeType::Text,
        )];
        let mut entries = merge(&defs, &[]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].id.is_none());
        assert!(entries[0].value.is_empty());

        entries[0].value = "blue".into();
        let result = reconcile(&entries, "gid://shopify/Product/7");
        assert_eq!(
            result.candidates(),
            [WriteCandidate {
                owner_id: "gid://shopify/Product/7".into(),
                namespace: "custom".into(),
                key: "color".into(),
                value: "blue".into(),
                ty: AttributeType::Text,
            }]
        );
    }
}
