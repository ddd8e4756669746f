use async_graphql::{Context, EmptySubscription, ID, Object, Schema};
use sqlx::SqlitePool;

use crate::attribute::mutations::{
    AttributeCreatePayload, AttributeDeletePayload, AttributeUpdatePayload,
};
use crate::attribute::{AttributeCreateInput, AttributeNode, AttributeUpdateInput};
use crate::attribute_value::mutations::{
    AttributeValueCreatePayload, AttributeValueDeletePayload, AttributeValueUpdatePayload,
};
use crate::attribute_value::{
    AttributeValueCreateInput, AttributeValueNode, AttributeValueUpdateInput,
};

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn attributes(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<AttributeNode>> {
        crate::attribute::queries::get_all_attributes(ctx).await
    }

    async fn attribute(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<AttributeNode>> {
        crate::attribute::queries::get_attribute(ctx, id).await
    }

    async fn attribute_value(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<Option<AttributeValueNode>> {
        crate::attribute_value::queries::get_attribute_value(ctx, id).await
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Creates an attribute.
    async fn attribute_create(
        &self,
        ctx: &Context<'_>,
        input: AttributeCreateInput,
    ) -> async_graphql::Result<AttributeCreatePayload> {
        crate::attribute::mutations::attribute_create(ctx, input).await
    }

    /// Updates an attribute, adding and removing values.
    async fn attribute_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: AttributeUpdateInput,
    ) -> async_graphql::Result<AttributeUpdatePayload> {
        crate::attribute::mutations::attribute_update(ctx, id, input).await
    }

    /// Deletes an attribute together with its values.
    async fn attribute_delete(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<AttributeDeletePayload> {
        crate::attribute::mutations::attribute_delete(ctx, id).await
    }

    /// Creates an attribute choice value.
    async fn attribute_value_create(
        &self,
        ctx: &Context<'_>,
        input: AttributeValueCreateInput,
    ) -> async_graphql::Result<AttributeValueCreatePayload> {
        crate::attribute_value::mutations::attribute_value_create(ctx, input).await
    }

    /// Updates an attribute choice value.
    async fn attribute_value_update(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: AttributeValueUpdateInput,
    ) -> async_graphql::Result<AttributeValueUpdatePayload> {
        crate::attribute_value::mutations::attribute_value_update(ctx, id, input).await
    }

    /// Deletes an attribute choice value.
    async fn attribute_value_delete(
        &self,
        ctx: &Context<'_>,
        id: ID,
    ) -> async_graphql::Result<AttributeValueDeletePayload> {
        crate::attribute_value::mutations::attribute_value_delete(ctx, id).await
    }
}

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(pool: SqlitePool) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(pool)
    .finish()
}
