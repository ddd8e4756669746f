use async_graphql::{Context, ID, Object};
use sqlx::SqlitePool;

use super::db::{fetch_all_attributes, fetch_attribute_by_id};
use super::models::AttributeNode;
use crate::attribute_value::db::fetch_values_for_attribute;
use crate::attribute_value::models::AttributeValueNode;
use crate::graphql::errors::internal_error;
use crate::graphql::node::{ATTRIBUTE, from_global_id, to_global_id};

#[Object]
impl AttributeNode {
    async fn id(&self) -> ID {
        ID::from(to_global_id(ATTRIBUTE, &self.0.id))
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    async fn values(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<AttributeValueNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        let values = fetch_values_for_attribute(pool, &self.0.id)
            .await
            .map_err(internal_error)?;
        Ok(values.into_iter().map(AttributeValueNode::from).collect())
    }
}

pub async fn get_all_attributes(ctx: &Context<'_>) -> async_graphql::Result<Vec<AttributeNode>> {
    let pool = ctx.data::<SqlitePool>()?;
    let records = fetch_all_attributes(pool).await.map_err(internal_error)?;
    Ok(records.into_iter().map(AttributeNode::from).collect())
}

pub async fn get_attribute(
    ctx: &Context<'_>,
    id: ID,
) -> async_graphql::Result<Option<AttributeNode>> {
    let Some((type_name, pk)) = from_global_id(&id) else {
        return Ok(None);
    };
    if type_name != ATTRIBUTE {
        return Ok(None);
    }

    let pool = ctx.data::<SqlitePool>()?;
    let record = fetch_attribute_by_id(pool, &pk)
        .await
        .map_err(internal_error)?;
    Ok(record.map(AttributeNode::from))
}
