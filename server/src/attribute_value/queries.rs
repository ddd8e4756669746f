use async_graphql::{Context, ID, Object};
use sqlx::SqlitePool;

use super::db::fetch_value_by_id;
use super::models::AttributeValueNode;
use crate::attribute::AttributeNode;
use crate::attribute::db::fetch_attribute_by_id;
use crate::graphql::errors::internal_error;
use crate::graphql::node::{ATTRIBUTE_VALUE, from_global_id, to_global_id};

#[Object]
impl AttributeValueNode {
    async fn id(&self) -> ID {
        ID::from(to_global_id(ATTRIBUTE_VALUE, &self.0.id))
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn slug(&self) -> &str {
        &self.0.slug
    }

    /// Raw payload, e.g. a HEX colour.
    async fn value(&self) -> &str {
        &self.0.value
    }

    async fn attribute(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<AttributeNode>> {
        let pool = ctx.data::<SqlitePool>()?;
        let attribute = fetch_attribute_by_id(pool, &self.0.attribute)
            .await
            .map_err(internal_error)?;
        Ok(attribute.map(AttributeNode::from))
    }
}

pub async fn get_attribute_value(
    ctx: &Context<'_>,
    id: ID,
) -> async_graphql::Result<Option<AttributeValueNode>> {
    let Some((type_name, pk)) = from_global_id(&id) else {
        return Ok(None);
    };
    if type_name != ATTRIBUTE_VALUE {
        return Ok(None);
    }

    let pool = ctx.data::<SqlitePool>()?;
    let record = fetch_value_by_id(pool, &pk).await.map_err(internal_error)?;
    Ok(record.map(AttributeValueNode::from))
}
