//! Opaque global identifiers.
//!
//! API ids encode the entity type next to the primary key so a value id can
//! never be mistaken for an attribute id.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{MutationError, MutationResult};

pub const ATTRIBUTE: &str = "Attribute";
pub const ATTRIBUTE_VALUE: &str = "AttributeValue";

pub fn to_global_id(type_name: &str, pk: &str) -> String {
    STANDARD.encode(format!("{type_name}:{pk}"))
}

/// Split a global id into `(type_name, pk)`.
pub fn from_global_id(global_id: &str) -> Option<(String, String)> {
    let decoded = STANDARD.decode(global_id.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (type_name, pk) = decoded.split_once(':')?;
    if type_name.is_empty() || pk.is_empty() {
        return None;
    }
    Some((type_name.to_string(), pk.to_string()))
}

/// Resolve a global id to a primary key of the expected type.
///
/// Malformed ids and ids of another type are reported as `NotFound`.
pub fn resolve_pk(global_id: &str, expected_type: &str) -> MutationResult<String> {
    match from_global_id(global_id) {
        Some((type_name, pk)) if type_name == expected_type => Ok(pk),
        _ => Err(MutationError::not_found(global_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_id_decodes_to_type_and_pk() {
        let id = to_global_id(ATTRIBUTE, "ckabc123");
        assert_eq!(
            from_global_id(&id),
            Some((ATTRIBUTE.to_string(), "ckabc123".to_string()))
        );
        assert_eq!(resolve_pk(&id, ATTRIBUTE).unwrap(), "ckabc123");
    }

    #[test]
    fn type_mismatch_is_not_found() {
        let id = to_global_id(ATTRIBUTE_VALUE, "ckabc123");
        match resolve_pk(&id, ATTRIBUTE) {
            Err(MutationError::NotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_not_found() {
        assert!(from_global_id("not base64!").is_none());
        assert!(from_global_id(&STANDARD.encode("no-separator")).is_none());
        assert!(from_global_id(&STANDARD.encode("Attribute:")).is_none());
        assert!(matches!(
            resolve_pk("", ATTRIBUTE),
            Err(MutationError::NotFound { .. })
        ));
    }
}
