use async_graphql::{Context, ErrorExtensions, ID, InputObject, SimpleObject};
use sqlx::SqlitePool;

use super::db::{
    delete_value, fetch_value_by_id, insert_value, name_conflicts_for_value,
    slug_conflicts_for_value, update_value,
};
use super::models::{AttributeValueNode, AttributeValueRecord, CleanedValue};
use crate::attribute::db::fetch_attribute_by_id;
use crate::auth::{Permission, User, require_permission};
use crate::error::{MutationError, MutationResult, ensure_valid, unique_violation};
use crate::graphql::node::{ATTRIBUTE, ATTRIBUTE_VALUE, resolve_pk};
use crate::metrics_exporter::record_mutation;
use crate::validation::FieldError;
use crate::validation::fields::attribute_value_fields;
use crate::validation::slug::slugify;

pub const NAME_TAKEN: &str = "Attribute value with this Name and Attribute already exists.";
pub const SLUG_TAKEN: &str = "Attribute value with this Slug and Attribute already exists.";

#[derive(Clone, Debug, InputObject)]
pub struct AttributeValueCreateInput {
    /// Attribute to which the value will be assigned.
    pub attribute: ID,
    /// Name displayed in the interface.
    pub name: String,
    /// Real value, e.g. a HEX colour.
    pub value: String,
}

#[derive(Clone, Debug, InputObject)]
pub struct AttributeValueUpdateInput {
    pub name: String,
    pub value: String,
}

#[derive(SimpleObject)]
pub struct AttributeValueCreatePayload {
    pub errors: Vec<FieldError>,
    pub attribute_value: Option<AttributeValueNode>,
}

#[derive(SimpleObject)]
pub struct AttributeValueUpdatePayload {
    pub errors: Vec<FieldError>,
    pub attribute_value: Option<AttributeValueNode>,
}

#[derive(SimpleObject)]
pub struct AttributeValueDeletePayload {
    pub errors: Vec<FieldError>,
    pub attribute_value: Option<AttributeValueNode>,
}

pub async fn attribute_value_create(
    ctx: &Context<'_>,
    input: AttributeValueCreateInput,
) -> async_graphql::Result<AttributeValueCreatePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = create_value_raw(pool, ctx.data_opt::<User>(), input).await;
    record_mutation("attribute_value_create", &result);

    match result {
        Ok(record) => Ok(AttributeValueCreatePayload {
            errors: Vec::new(),
            attribute_value: Some(record.into()),
        }),
        Err(MutationError::Validation(errors)) => Ok(AttributeValueCreatePayload {
            errors,
            attribute_value: None,
        }),
        Err(err) => Err(err.extend()),
    }
}

pub async fn attribute_value_update(
    ctx: &Context<'_>,
    id: ID,
    input: AttributeValueUpdateInput,
) -> async_graphql::Result<AttributeValueUpdatePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = update_value_raw(pool, ctx.data_opt::<User>(), &id, input).await;
    record_mutation("attribute_value_update", &result);

    match result {
        Ok(record) => Ok(AttributeValueUpdatePayload {
            errors: Vec::new(),
            attribute_value: Some(record.into()),
        }),
        Err(MutationError::Validation(errors)) => Ok(AttributeValueUpdatePayload {
            errors,
            attribute_value: None,
        }),
        Err(err) => Err(err.extend()),
    }
}

pub async fn attribute_value_delete(
    ctx: &Context<'_>,
    id: ID,
) -> async_graphql::Result<AttributeValueDeletePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = delete_value_raw(pool, ctx.data_opt::<User>(), &id).await;
    record_mutation("attribute_value_delete", &result);

    match result {
        Ok(record) => Ok(AttributeValueDeletePayload {
            errors: Vec::new(),
            attribute_value: Some(record.into()),
        }),
        Err(err) => Err(err.extend()),
    }
}

fn clean_value(name: String, value: String) -> CleanedValue {
    let slug = slugify(&name);
    CleanedValue { name, value, slug }
}

/// Field error for a write rejected by the per-attribute unique constraint
/// on `column`.
fn value_conflict(column: &str) -> Option<FieldError> {
    match column {
        "name" => Some(FieldError::new("name", NAME_TAKEN)),
        "slug" => Some(FieldError::new("slug", SLUG_TAKEN)),
        _ => None,
    }
}

/// Field checks plus name and slug uniqueness among the other values of
/// `attribute_id`.
async fn check_value(
    pool: &SqlitePool,
    attribute_id: &str,
    value: &CleanedValue,
    exclude_id: Option<&str>,
) -> Result<Vec<FieldError>, sqlx::Error> {
    let mut errors =
        attribute_value_fields(&value.name, &value.value, &value.slug, Some(attribute_id));

    if !errors.iter().any(|e| e.field == "name")
        && name_conflicts_for_value(pool, attribute_id, &value.name, exclude_id).await?
    {
        errors.push(FieldError::new("name", NAME_TAKEN));
    }
    if !errors.iter().any(|e| e.field == "slug")
        && slug_conflicts_for_value(pool, attribute_id, &value.slug, exclude_id).await?
    {
        errors.push(FieldError::new("slug", SLUG_TAKEN));
    }

    Ok(errors)
}

pub async fn create_value_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    input: AttributeValueCreateInput,
) -> MutationResult<AttributeValueRecord> {
    require_permission(user, Permission::ManageProducts)?;

    let attribute_pk = resolve_pk(&input.attribute, ATTRIBUTE)?;
    let attribute = fetch_attribute_by_id(pool, &attribute_pk)
        .await?
        .ok_or_else(|| MutationError::not_found(input.attribute.as_str()))?;

    let value = clean_value(input.name, input.value);
    ensure_valid(check_value(pool, &attribute.id, &value, None).await?)?;

    let record = insert_value(pool, &attribute.id, &value)
        .await
        .map_err(|e| unique_violation(e, value_conflict))?;

    tracing::info!(
        attribute_id = %attribute.id,
        value_id = %record.id,
        slug = %record.slug,
        "created attribute value"
    );
    Ok(record)
}

/// Update name and payload of an existing value. The owning attribute is
/// never changed.
pub async fn update_value_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    id: &str,
    input: AttributeValueUpdateInput,
) -> MutationResult<AttributeValueRecord> {
    require_permission(user, Permission::ManageProducts)?;

    let pk = resolve_pk(id, ATTRIBUTE_VALUE)?;
    let existing = fetch_value_by_id(pool, &pk)
        .await?
        .ok_or_else(|| MutationError::not_found(id))?;

    let value = clean_value(input.name, input.value);
    ensure_valid(check_value(pool, &existing.attribute, &value, Some(&existing.id)).await?)?;

    let written = update_value(pool, &existing.id, &value)
        .await
        .map_err(|e| unique_violation(e, value_conflict))?;
    if written == 0 {
        return Err(MutationError::not_found(id));
    }

    tracing::info!(
        attribute_id = %existing.attribute,
        value_id = %existing.id,
        slug = %value.slug,
        "updated attribute value"
    );
    Ok(AttributeValueRecord {
        id: existing.id,
        attribute: existing.attribute,
        name: value.name,
        value: value.value,
        slug: value.slug,
    })
}

pub async fn delete_value_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    id: &str,
) -> MutationResult<AttributeValueRecord> {
    let pk = resolve_pk(id, ATTRIBUTE_VALUE)?;
    let record = fetch_value_by_id(pool, &pk)
        .await?
        .ok_or_else(|| MutationError::not_found(id))?;

    require_permission(user, Permission::ManageProducts)?;

    delete_value(pool, &record.id).await?;
    tracing::info!(
        attribute_id = %record.attribute,
        value_id = %record.id,
        "deleted attribute value"
    );
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::db::insert_attribute;
    use crate::test_helpers::create_test_pool;

    fn cleaned(name: &str, slug: &str) -> CleanedValue {
        CleanedValue {
            name: name.to_string(),
            value: String::new(),
            slug: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn storage_conflicts_report_the_violated_column() {
        let pool = create_test_pool().await.unwrap();
        let attribute = insert_attribute(&pool, "Size", "size").await.unwrap();
        insert_value(&pool, &attribute.id, &cleaned("Large", "l"))
            .await
            .unwrap();

        let err = insert_value(&pool, &attribute.id, &cleaned("Big", "l"))
            .await
            .unwrap_err();
        match unique_violation(err, value_conflict) {
            MutationError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("slug", SLUG_TAKEN)])
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let err = insert_value(&pool, &attribute.id, &cleaned("Large", "large"))
            .await
            .unwrap_err();
        match unique_violation(err, value_conflict) {
            MutationError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("name", NAME_TAKEN)])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
