use sqlx::{Executor, Sqlite, SqlitePool};

use super::models::{AttributeValueRecord, CleanedValue};

const SELECT_VALUE: &str = "SELECT id, attribute, name, value, slug FROM attribute_values";

pub async fn fetch_value_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<AttributeValueRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttributeValueRecord>(&format!("{SELECT_VALUE} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Values of one attribute in insertion order.
pub async fn fetch_values_for_attribute(
    pool: &SqlitePool,
    attribute_id: &str,
) -> Result<Vec<AttributeValueRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttributeValueRecord>(&format!(
        "{SELECT_VALUE} WHERE attribute = ? ORDER BY rowid"
    ))
    .bind(attribute_id)
    .fetch_all(pool)
    .await
}

/// Whether a sibling other than `exclude_id` already uses `name`.
pub async fn name_conflicts_for_value(
    pool: &SqlitePool,
    attribute_id: &str,
    name: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM attribute_values WHERE attribute = ? AND name = ? AND id IS NOT ? LIMIT 1",
    )
    .bind(attribute_id)
    .bind(name)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(exists.is_some())
}

/// Whether a sibling other than `exclude_id` already uses `slug`.
pub async fn slug_conflicts_for_value(
    pool: &SqlitePool,
    attribute_id: &str,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> = sqlx::query_scalar(
        "SELECT 1 FROM attribute_values WHERE attribute = ? AND slug = ? AND id IS NOT ? LIMIT 1",
    )
    .bind(attribute_id)
    .bind(slug)
    .bind(exclude_id)
    .fetch_optional(pool)
    .await?;
    Ok(exists.is_some())
}

pub async fn insert_value<'e, E>(
    executor: E,
    attribute_id: &str,
    value: &CleanedValue,
) -> Result<AttributeValueRecord, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = cuid2::create_id();
    sqlx::query(
        "INSERT INTO attribute_values (id, attribute, name, value, slug) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(attribute_id)
    .bind(&value.name)
    .bind(&value.value)
    .bind(&value.slug)
    .execute(executor)
    .await?;

    Ok(AttributeValueRecord {
        id,
        attribute: attribute_id.to_string(),
        name: value.name.clone(),
        value: value.value.clone(),
        slug: value.slug.clone(),
    })
}

/// Returns the number of rows written; 0 when the row no longer exists.
pub async fn update_value<'e, E>(
    executor: E,
    id: &str,
    value: &CleanedValue,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result =
        sqlx::query("UPDATE attribute_values SET name = ?, value = ?, slug = ? WHERE id = ?")
            .bind(&value.name)
            .bind(&value.value)
            .bind(&value.slug)
            .bind(id)
            .execute(executor)
            .await?;
    Ok(result.rows_affected())
}

pub async fn delete_value<'e, E>(executor: E, id: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM attribute_values WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
