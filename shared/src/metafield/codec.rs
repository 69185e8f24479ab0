//! Per-type value normalization
//!
//! Only booleans, numbers and JSON are checked locally. Every other type
//! passes through and is left to the remote schema to enforce.

use thiserror::Error;

use crate::models::AttributeType;

/// Input does not fit its attribute type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("value {input:?} is not valid for type {ty}")]
pub struct Rejected {
    pub input: String,
    pub ty: AttributeType,
}

/// Normalize raw user input for `ty`
///
/// `Ok(None)` means the input was blank: leave the stored value unchanged.
/// `Ok(Some(v))` is the wire value.
pub fn normalize(raw: &str, ty: &AttributeType) -> Result<Option<String>, Rejected> {
    let input = raw.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let reject = || Rejected {
        input: input.to_string(),
        ty: ty.clone(),
    };

    match ty {
        // Kept verbatim so the operator's formatting survives.
        AttributeType::Json => serde_json::from_str::<serde_json::Value>(input)
            .map(|_| Some(input.to_string()))
            .map_err(|_| reject()),
        AttributeType::Boolean => match input.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Some("true".to_string())),
            "false" | "0" | "no" => Ok(Some("false".to_string())),
            _ => Err(reject()),
        },
        AttributeType::Integer | AttributeType::Decimal => {
            if is_plain_number(input) {
                Ok(Some(input.to_string()))
            } else {
                Err(reject())
            }
        }
        _ => Ok(Some(input.to_string())),
    }
}

/// Optional leading `-`, digits, at most one `.`, at least one digit
fn is_plain_number(input: &str) -> bool {
    let body = input.strip_prefix('-').unwrap_or(input);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    digits > 0 && dots <= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_types() -> Vec<AttributeType> {
        let mut types = vec![
            AttributeType::Text,
            AttributeType::MultilineText,
            AttributeType::Integer,
            AttributeType::Decimal,
            AttributeType::Boolean,
            AttributeType::Date,
            AttributeType::DateTime,
            AttributeType::Json,
            AttributeType::Color,
            AttributeType::FileReference,
            AttributeType::ProductReference,
            AttributeType::CollectionReference,
            AttributeType::VariantReference,
        ];
        let lists: Vec<_> = types
            .iter()
            .map(|t| AttributeType::List(Box::new(t.clone())))
            .collect();
        types.extend(lists);
        types
    }

    #[test]
    fn test_blank_means_no_change_for_every_type() {
        for ty in all_types() {
            assert_eq!(normalize("", &ty), Ok(None), "{ty}");
            assert_eq!(normalize("   \n", &ty), Ok(None), "{ty}");
        }
    }

    #[test]
    fn test_boolean_canonical_forms() {
        let ty = AttributeType::Boolean;
        for input in ["true", "TRUE", "1", "Yes"] {
            assert_eq!(normalize(input, &ty), Ok(Some("true".into())));
        }
        for input in ["false", "0", "NO"] {
            assert_eq!(normalize(input, &ty), Ok(Some("false".into())));
        }
        let err = normalize("maybe", &ty).unwrap_err();
        assert_eq!(err.input, "maybe");
        assert_eq!(err.ty, AttributeType::Boolean);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            normalize("12.5", &AttributeType::Decimal),
            Ok(Some("12.5".into()))
        );
        assert!(normalize("12.5.3", &AttributeType::Decimal).is_err());
        assert_eq!(
            normalize("-3", &AttributeType::Integer),
            Ok(Some("-3".into()))
        );
        assert_eq!(
            normalize(" 42 ", &AttributeType::Integer),
            Ok(Some("42".into()))
        );
        for bad in ["1e5", "1,000", "-", ".", "--1", "+1", "abc", "1 2"] {
            assert!(normalize(bad, &AttributeType::Decimal).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_json_is_kept_verbatim() {
        let input = r#"{"a":1}"#;
        assert_eq!(
            normalize(input, &AttributeType::Json),
            Ok(Some(input.to_string()))
        );

        let spaced = "{ \"a\" :  [1, 2] }";
        assert_eq!(
            normalize(spaced, &AttributeType::Json).unwrap().as_deref(),
            Some(spaced)
        );

        assert!(normalize("{a:1}", &AttributeType::Json).is_err());
    }

    #[test]
    fn test_other_types_pass_through() {
        assert_eq!(
            normalize("not-a-color", &AttributeType::Color),
            Ok(Some("not-a-color".into()))
        );
        assert_eq!(
            normalize("2024-13-45", &AttributeType::Date),
            Ok(Some("2024-13-45".into()))
        );
        assert_eq!(
            normalize("[\"gid://shopify/MediaImage/1\"]", &AttributeType::parse("list.file_reference")),
            Ok(Some("[\"gid://shopify/MediaImage/1\"]".into()))
        );
    }
}
