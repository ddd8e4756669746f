use std::collections::HashSet;

use async_graphql::{Context, ErrorExtensions, ID, InputObject, SimpleObject};
use sqlx::SqlitePool;

use super::db::{
    delete_attribute, fetch_attribute_by_id, insert_attribute, slug_conflicts_for_attribute,
    update_attribute,
};
use super::models::{AttributeNode, AttributeRecord};
use super::validation::{
    ADD_VALUES_FIELD, VALUES_FIELD, batch_conflict, check_removal_ownership, check_siblings,
    clean_values, sibling_conflict,
};
use crate::attribute_value::db::{
    delete_value, fetch_value_by_id, fetch_values_for_attribute, insert_value,
};
use crate::attribute_value::models::AttributeValueRecord;
use crate::auth::{Permission, User, require_permission};
use crate::error::{MutationError, MutationResult, ensure_valid, unique_violation};
use crate::graphql::node::{ATTRIBUTE, ATTRIBUTE_VALUE, resolve_pk};
use crate::metrics_exporter::record_mutation;
use crate::validation::FieldError;
use crate::validation::fields::attribute_fields;
use crate::validation::slug::slugify;

pub const SLUG_TAKEN: &str = "Attribute with this Slug already exists.";

#[derive(Clone, Debug, InputObject)]
pub struct AttributeCreateValueInput {
    /// Name displayed in the interface.
    pub name: String,
    /// Real value, e.g. a HEX colour.
    pub value: String,
}

#[derive(Clone, Debug, InputObject)]
pub struct AttributeCreateInput {
    pub name: String,
    #[graphql(default)]
    pub values: Vec<AttributeCreateValueInput>,
}

#[derive(Clone, Debug, InputObject)]
pub struct AttributeUpdateInput {
    pub name: String,
    #[graphql(default)]
    pub add_values: Vec<AttributeCreateValueInput>,
    #[graphql(default)]
    pub remove_values: Vec<ID>,
}

#[derive(SimpleObject)]
pub struct AttributeCreatePayload {
    pub errors: Vec<FieldError>,
    pub attribute: Option<AttributeNode>,
}

#[derive(SimpleObject)]
pub struct AttributeUpdatePayload {
    pub errors: Vec<FieldError>,
    pub attribute: Option<AttributeNode>,
}

#[derive(SimpleObject)]
pub struct AttributeDeletePayload {
    pub errors: Vec<FieldError>,
    pub attribute: Option<AttributeNode>,
}

pub async fn attribute_create(
    ctx: &Context<'_>,
    input: AttributeCreateInput,
) -> async_graphql::Result<AttributeCreatePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = create_attribute_raw(pool, ctx.data_opt::<User>(), input).await;
    record_mutation("attribute_create", &result);

    match result {
        Ok(record) => Ok(AttributeCreatePayload {
            errors: Vec::new(),
            attribute: Some(record.into()),
        }),
        Err(MutationError::Validation(errors)) => Ok(AttributeCreatePayload {
            errors,
            attribute: None,
        }),
        Err(err) => Err(err.extend()),
    }
}

pub async fn attribute_update(
    ctx: &Context<'_>,
    id: ID,
    input: AttributeUpdateInput,
) -> async_graphql::Result<AttributeUpdatePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = update_attribute_raw(pool, ctx.data_opt::<User>(), &id, input).await;
    record_mutation("attribute_update", &result);

    match result {
        Ok(record) => Ok(AttributeUpdatePayload {
            errors: Vec::new(),
            attribute: Some(record.into()),
        }),
        Err(MutationError::Validation(errors)) => Ok(AttributeUpdatePayload {
            errors,
            attribute: None,
        }),
        Err(err) => Err(err.extend()),
    }
}

pub async fn attribute_delete(
    ctx: &Context<'_>,
    id: ID,
) -> async_graphql::Result<AttributeDeletePayload> {
    let pool = ctx.data::<SqlitePool>()?;
    let result = delete_attribute_raw(pool, ctx.data_opt::<User>(), &id).await;
    record_mutation("attribute_delete", &result);

    match result {
        Ok(record) => Ok(AttributeDeletePayload {
            errors: Vec::new(),
            attribute: Some(record.into()),
        }),
        Err(err) => Err(err.extend()),
    }
}

fn attribute_conflict(column: &str) -> Option<FieldError> {
    (column == "slug").then(|| FieldError::new("slug", SLUG_TAKEN))
}

/// Field checks on the attribute itself, plus slug uniqueness among
/// attributes other than `exclude_id`.
async fn clean_attribute(
    pool: &SqlitePool,
    name: &str,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<Vec<FieldError>, sqlx::Error> {
    let mut errors = attribute_fields(name, slug);
    let slug_is_reported = errors.iter().any(|e| e.field == "slug");
    if !slug_is_reported && slug_conflicts_for_attribute(pool, slug, exclude_id).await? {
        errors.push(FieldError::new("slug", SLUG_TAKEN));
    }
    Ok(errors)
}

pub async fn create_attribute_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    input: AttributeCreateInput,
) -> MutationResult<AttributeRecord> {
    require_permission(user, Permission::ManageProducts)?;

    let slug = slugify(&input.name);
    let mut errors = clean_attribute(pool, &input.name, &slug, None).await?;
    let (values, value_errors) = clean_values(VALUES_FIELD, &input.values);
    errors.extend(value_errors);
    ensure_valid(errors)?;

    let mut tx = pool.begin().await?;
    let record = insert_attribute(&mut *tx, &input.name, &slug)
        .await
        .map_err(|e| unique_violation(e, attribute_conflict))?;
    for value in &values {
        insert_value(&mut *tx, &record.id, value)
            .await
            .map_err(|e| unique_violation(e, |column| batch_conflict(VALUES_FIELD, column)))?;
    }
    tx.commit().await?;

    tracing::info!(
        attribute_id = %record.id,
        slug = %record.slug,
        values = values.len(),
        "created attribute"
    );
    Ok(record)
}

pub async fn update_attribute_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    id: &str,
    input: AttributeUpdateInput,
) -> MutationResult<AttributeRecord> {
    require_permission(user, Permission::ManageProducts)?;

    let pk = resolve_pk(id, ATTRIBUTE)?;
    let attribute = fetch_attribute_by_id(pool, &pk)
        .await?
        .ok_or_else(|| MutationError::not_found(id))?;

    let removals = resolve_removals(pool, &input.remove_values).await?;

    let slug = slugify(&input.name);
    let mut errors = clean_attribute(pool, &input.name, &slug, Some(&attribute.id)).await?;

    let (additions, value_errors) = clean_values(ADD_VALUES_FIELD, &input.add_values);
    errors.extend(value_errors);
    errors.extend(check_removal_ownership(&attribute.id, &removals));

    let mut seen = HashSet::new();
    let removed: Vec<&str> = removals
        .iter()
        .map(|(_, record)| record.id.as_str())
        .filter(|value_id| seen.insert(*value_id))
        .collect();
    let siblings: Vec<AttributeValueRecord> = fetch_values_for_attribute(pool, &attribute.id)
        .await?
        .into_iter()
        .filter(|sibling| !removed.contains(&sibling.id.as_str()))
        .collect();
    errors.extend(check_siblings(ADD_VALUES_FIELD, &additions, &siblings));
    ensure_valid(errors)?;

    let mut tx = pool.begin().await?;
    let written = update_attribute(&mut *tx, &attribute.id, &input.name, &slug)
        .await
        .map_err(|e| unique_violation(e, attribute_conflict))?;
    if written == 0 {
        return Err(MutationError::not_found(id));
    }
    for value_id in &removed {
        delete_value(&mut *tx, value_id).await?;
    }
    for value in &additions {
        insert_value(&mut *tx, &attribute.id, value)
            .await
            .map_err(|e| {
                unique_violation(e, |column| sibling_conflict(ADD_VALUES_FIELD, value, column))
            })?;
    }
    tx.commit().await?;

    tracing::info!(
        attribute_id = %attribute.id,
        slug = %slug,
        added = additions.len(),
        removed = removed.len(),
        "updated attribute"
    );
    Ok(AttributeRecord {
        id: attribute.id,
        name: input.name,
        slug,
    })
}

/// Resolve every id scheduled for removal; the first unresolvable id ends
/// the request.
async fn resolve_removals(
    pool: &SqlitePool,
    ids: &[ID],
) -> MutationResult<Vec<(String, AttributeValueRecord)>> {
    let mut removals = Vec::with_capacity(ids.len());
    for id in ids {
        let pk = resolve_pk(id, ATTRIBUTE_VALUE)?;
        let record = fetch_value_by_id(pool, &pk)
            .await?
            .ok_or_else(|| MutationError::not_found(id.as_str()))?;
        removals.push((id.to_string(), record));
    }
    Ok(removals)
}

/// Delete an attribute and, through the foreign key, all of its values.
///
/// The id is resolved before the permission check, so a missing attribute
/// is reported as not found to every caller.
pub async fn delete_attribute_raw(
    pool: &SqlitePool,
    user: Option<&User>,
    id: &str,
) -> MutationResult<AttributeRecord> {
    let pk = resolve_pk(id, ATTRIBUTE)?;
    let record = fetch_attribute_by_id(pool, &pk)
        .await?
        .ok_or_else(|| MutationError::not_found(id))?;

    require_permission(user, Permission::ManageProducts)?;

    delete_attribute(pool, &record.id).await?;
    tracing::info!(attribute_id = %record.id, slug = %record.slug, "deleted attribute");
    Ok(record)
}
