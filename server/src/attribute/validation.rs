//! Cleaning of the value lists carried by attribute mutations.
//!
//! Every check returns its own errors; callers concatenate them so a single
//! response reports every problem with the input.

use std::collections::HashSet;

use super::mutations::AttributeCreateValueInput;
use crate::attribute_value::models::{AttributeValueRecord, CleanedValue};
use crate::validation::FieldError;
use crate::validation::fields::attribute_value_fields;
use crate::validation::slug::slugify;

pub const VALUES_FIELD: &str = "values";
pub const ADD_VALUES_FIELD: &str = "add_values";
pub const REMOVE_VALUES_FIELD: &str = "remove_values";

pub const DUPLICATED_NAMES: &str = "Duplicated attribute value names provided.";
pub const SLUGS_NOT_UNIQUE: &str = "Provided attribute value names are not unique.";
pub const NAME_EXISTS: &str = "AttributeValue with given name already exists.";
pub const SLUG_EXISTS: &str = "AttributeValue name is not unique.";
pub const NOT_OWNED: &str = "AttributeValue does not belong to this Attribute.";

/// Derive slugs for a batch of new values and validate the batch.
///
/// `field` is the input field holding the batch; it prefixes every error.
/// The owner is not known yet, so errors on the `attribute` back-reference
/// are dropped.
pub fn clean_values(
    field: &str,
    inputs: &[AttributeCreateValueInput],
) -> (Vec<CleanedValue>, Vec<FieldError>) {
    if inputs.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut errors = Vec::new();

    if has_duplicates(inputs.iter().map(|input| input.name.as_str())) {
        errors.push(FieldError::new(field, DUPLICATED_NAMES));
    }

    let cleaned: Vec<CleanedValue> = inputs
        .iter()
        .map(|input| CleanedValue {
            name: input.name.clone(),
            value: input.value.clone(),
            slug: slugify(&input.name),
        })
        .collect();

    if has_duplicates(cleaned.iter().map(|value| value.slug.as_str())) {
        errors.push(FieldError::new(field, SLUGS_NOT_UNIQUE));
    }

    for value in &cleaned {
        errors.extend(
            attribute_value_fields(&value.name, &value.value, &value.slug, None)
                .into_iter()
                .filter(|error| error.field != "attribute")
                .map(|error| error.nested(field)),
        );
    }

    (cleaned, errors)
}

/// Reject new values whose name or slug is already taken by a sibling.
pub fn check_siblings(
    field: &str,
    values: &[CleanedValue],
    siblings: &[AttributeValueRecord],
) -> Vec<FieldError> {
    let names: HashSet<&str> = siblings.iter().map(|s| s.name.as_str()).collect();
    let slugs: HashSet<&str> = siblings.iter().map(|s| s.slug.as_str()).collect();

    let mut errors = Vec::new();
    for value in values {
        if names.contains(value.name.as_str()) {
            errors.extend(sibling_conflict(field, value, "name"));
        }
        if slugs.contains(value.slug.as_str()) {
            errors.extend(sibling_conflict(field, value, "slug"));
        }
    }
    errors
}

/// Error for `value` clashing with a sibling on `column` (`name` or `slug`).
pub fn sibling_conflict(field: &str, value: &CleanedValue, column: &str) -> Option<FieldError> {
    match column {
        "name" => Some(FieldError::new(format!("{field}:{}", value.name), NAME_EXISTS)),
        "slug" => Some(FieldError::new(format!("{field}:{}", value.slug), SLUG_EXISTS)),
        _ => None,
    }
}

/// Error for two values of one batch clashing on `column`.
pub fn batch_conflict(field: &str, column: &str) -> Option<FieldError> {
    match column {
        "name" => Some(FieldError::new(field, DUPLICATED_NAMES)),
        "slug" => Some(FieldError::new(field, SLUGS_NOT_UNIQUE)),
        _ => None,
    }
}

/// Reject removal of values owned by another attribute.
///
/// `removals` pairs the id the caller sent with the resolved record.
pub fn check_removal_ownership(
    attribute_id: &str,
    removals: &[(String, AttributeValueRecord)],
) -> Vec<FieldError> {
    removals
        .iter()
        .filter(|(_, record)| record.attribute != attribute_id)
        .map(|(requested_id, _)| {
            FieldError::new(format!("{REMOVE_VALUES_FIELD}:{requested_id}"), NOT_OWNED)
        })
        .collect()
}

fn has_duplicates<'a>(items: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    items.into_iter().any(|item| !seen.insert(item))
}
