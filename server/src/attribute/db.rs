use sqlx::{Executor, Sqlite, SqlitePool};

use super::models::AttributeRecord;

pub async fn fetch_attribute_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<AttributeRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttributeRecord>("SELECT id, name, slug FROM attributes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_all_attributes(pool: &SqlitePool) -> Result<Vec<AttributeRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttributeRecord>("SELECT id, name, slug FROM attributes ORDER BY slug")
        .fetch_all(pool)
        .await
}

/// Whether an attribute other than `exclude_id` already uses `slug`.
pub async fn slug_conflicts_for_attribute(
    pool: &SqlitePool,
    slug: &str,
    exclude_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let exists: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM attributes WHERE slug = ? AND id IS NOT ? LIMIT 1")
            .bind(slug)
            .bind(exclude_id)
            .fetch_optional(pool)
            .await?;
    Ok(exists.is_some())
}

pub async fn insert_attribute<'e, E>(
    executor: E,
    name: &str,
    slug: &str,
) -> Result<AttributeRecord, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = cuid2::create_id();
    sqlx::query("INSERT INTO attributes (id, name, slug) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(name)
        .bind(slug)
        .execute(executor)
        .await?;

    Ok(AttributeRecord {
        id,
        name: name.to_string(),
        slug: slug.to_string(),
    })
}

/// Returns the number of rows written; 0 when the row no longer exists.
pub async fn update_attribute<'e, E>(
    executor: E,
    id: &str,
    name: &str,
    slug: &str,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("UPDATE attributes SET name = ?, slug = ? WHERE id = ?")
        .bind(name)
        .bind(slug)
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Delete an attribute; its values go with it through the foreign key.
pub async fn delete_attribute<'e, E>(executor: E, id: &str) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("DELETE FROM attributes WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
