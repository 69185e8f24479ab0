//! Schema merge: definitions ⟕ stored values
//!
//! One entry per `namespace.key` in the union of both lists:
//! - defined + valued: definition's name/type, stored id/value
//! - defined + unvalued: definition's name/type, no id, empty value
//! - valued + undefined: the stored value as-is, appended after the defined entries

use std::collections::{HashMap, HashSet};

use crate::models::{AttributeDefinition, AttributeValue, EditableEntry};

/// Build the edit model for one record
///
/// Definitions keep their given order; orphan values follow in stored order.
/// The definition's type wins over the stored value's recorded type.
pub fn merge(definitions: &[AttributeDefinition], values: &[AttributeValue]) -> Vec<EditableEntry> {
    let mut stored: HashMap<String, &AttributeValue> = HashMap::with_capacity(values.len());
    for value in values {
        stored.entry(value.identity()).or_insert(value);
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(definitions.len() + values.len());
    let mut entries = Vec::with_capacity(definitions.len() + values.len());

    for def in definitions {
        let identity = def.identity();
        if !seen.insert(identity.clone()) {
            continue;
        }
        entries.push(from_definition(def, stored.get(&identity).copied(), identity));
    }

    for value in values {
        let identity = value.identity();
        if seen.insert(identity.clone()) {
            entries.push(from_value(value, identity));
        }
    }

    tracing::debug!(
        definitions = definitions.len(),
        values = values.len(),
        entries = entries.len(),
        "Merged metafield schema"
    );
    entries
}

fn from_definition(
    def: &AttributeDefinition,
    stored: Option<&AttributeValue>,
    identity: String,
) -> EditableEntry {
    let display_name = if def.display_name.trim().is_empty() {
        identity
    } else {
        def.display_name.clone()
    };
    EditableEntry {
        id: stored.and_then(|v| v.id.clone()),
        namespace: def.namespace.clone(),
        key: def.key.clone(),
        display_name,
        ty: def.ty.clone(),
        value: stored.map(|v| v.raw_value.clone()).unwrap_or_default(),
    }
}

fn from_value(value: &AttributeValue, identity: String) -> EditableEntry {
    EditableEntry {
        id: value.id.clone(),
        namespace: value.namespace.clone(),
        key: value.key.clone(),
        display_name: identity,
        ty: value.ty.clone(),
        value: value.raw_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeType;

    fn def(ns: &str, key: &str, name: &str, ty: AttributeType) -> AttributeDefinition {
        AttributeDefinition::new(ns, key, name, ty)
    }

    fn value(id: &str, ns: &str, key: &str, raw: &str, ty: AttributeType) -> AttributeValue {
        AttributeValue {
            id: Some(id.into()),
            namespace: ns.into(),
            key: key.into(),
            raw_value: raw.into(),
            ty,
        }
    }

    #[test]
    fn test_definitions_drive_order_name_and_type() {
        let defs = vec![
            def("custom", "size", "Size", AttributeType::Integer),
            def("custom", "material", "Material", AttributeType::Text),
            def("specs", "care", "Care notes", AttributeType::MultilineText),
        ];
        // Stored order differs, and `size` was recorded with a stale type.
        let values = vec![
            value("gid://m/3", "specs", "care", "Hand wash", AttributeType::Text),
            value("gid://m/1", "custom", "size", "42", AttributeType::Text),
            value("gid://m/2", "custom", "material", "Linen", AttributeType::Text),
        ];

        let entries = merge(&defs, &values);
        assert_eq!(entries.len(), 3);
        let names: Vec<_> = entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, ["Size", "Material", "Care notes"]);
        assert_eq!(entries[0].ty, AttributeType::Integer);
        assert_eq!(entries[0].id.as_deref(), Some("gid://m/1"));
        assert_eq!(entries[0].value, "42");
        assert_eq!(entries[2].ty, AttributeType::MultilineText);
    }

    #[test]
    fn test_defined_without_value_is_empty() {
        let defs = vec![def("custom", "color", "Color", AttributeType::Text)];
        let entries = merge(&defs, &[]);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].id.is_none());
        assert_eq!(entries[0].value, "");
        assert_eq!(entries[0].namespace, "custom");
        assert_eq!(entries[0].key, "color");
    }

    #[test]
    fn test_no_definitions_falls_back_to_values() {
        let values = vec![
            value("gid://m/9", "z", "last", "1", AttributeType::Integer),
            value("gid://m/8", "a", "first", "{}", AttributeType::Json),
        ];
        let entries = merge(&[], &values);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "z.last");
        assert_eq!(entries[0].ty, AttributeType::Integer);
        assert_eq!(entries[1].display_name, "a.first");
        assert_eq!(entries[1].value, "{}");
    }

    #[test]
    fn test_orphan_values_follow_definitions() {
        let defs = vec![def("custom", "size", "Size", AttributeType::Integer)];
        let values = vec![
            value("gid://m/5", "legacy", "code", "X1", AttributeType::Text),
            value("gid://m/1", "custom", "size", "7", AttributeType::Integer),
        ];
        let entries = merge(&defs, &values);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "size");
        assert_eq!(entries[1].identity(), "legacy.code");
        assert_eq!(entries[1].id.as_deref(), Some("gid://m/5"));
    }

    #[test]
    fn test_blank_display_name_and_duplicates() {
        let defs = vec![
            def("custom", "size", "", AttributeType::Integer),
            def("custom", "size", "Size again", AttributeType::Text),
        ];
        let entries = merge(&defs, &[]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "custom.size");
        assert_eq!(entries[0].ty, AttributeType::Integer);
    }
}
