//! Column constraints for attribute records.
//!
//! These mirror the storage schema so violations can be reported per field
//! before anything is written.

use super::FieldError;

pub const ATTRIBUTE_NAME_MAX_LEN: usize = 100;
pub const ATTRIBUTE_SLUG_MAX_LEN: usize = 50;
pub const VALUE_NAME_MAX_LEN: usize = 100;
pub const VALUE_VALUE_MAX_LEN: usize = 100;
pub const VALUE_SLUG_MAX_LEN: usize = 100;

const BLANK: &str = "This field cannot be blank.";
const NULL: &str = "This field cannot be null.";

fn check_text(field: &str, text: &str, max_len: usize, allow_blank: bool) -> Option<FieldError> {
    if !allow_blank && text.trim().is_empty() {
        return Some(FieldError::new(field, BLANK));
    }

    let len = text.chars().count();
    if len > max_len {
        return Some(FieldError::new(
            field,
            format!("Ensure this value has at most {max_len} characters (it has {len})."),
        ));
    }

    None
}

pub fn attribute_fields(name: &str, slug: &str) -> Vec<FieldError> {
    [
        check_text("name", name, ATTRIBUTE_NAME_MAX_LEN, false),
        check_text("slug", slug, ATTRIBUTE_SLUG_MAX_LEN, false),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// `attribute` is the owning attribute's id, `None` while the parent is not
/// yet persisted.
pub fn attribute_value_fields(
    name: &str,
    value: &str,
    slug: &str,
    attribute: Option<&str>,
) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = [
        check_text("name", name, VALUE_NAME_MAX_LEN, false),
        check_text("value", value, VALUE_VALUE_MAX_LEN, true),
        check_text("slug", slug, VALUE_SLUG_MAX_LEN, false),
    ]
    .into_iter()
    .flatten()
    .collect();

    if attribute.is_none() {
        errors.push(FieldError::new("attribute", NULL));
    }

    errors
}
