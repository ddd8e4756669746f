//! End-to-end GraphQL requests against the catalog schema

use anyhow::Result;
use async_graphql::{Request, Response, Variables};
use catalog::auth::User;
use catalog::graphql::{AppSchema, build_schema};
use catalog::test_helpers::{create_test_pool, customer_user, staff_user};
use serde_json::{Value, json};

const CREATE_ATTRIBUTE: &str = r#"
    mutation Create($input: AttributeCreateInput!) {
        attributeCreate(input: $input) {
            errors { field message }
            attribute {
                id
                name
                slug
                values { id name slug value }
            }
        }
    }
"#;

const UPDATE_ATTRIBUTE: &str = r#"
    mutation Update($id: ID!, $input: AttributeUpdateInput!) {
        attributeUpdate(id: $id, input: $input) {
            errors { field message }
            attribute { slug values { name } }
        }
    }
"#;

const DELETE_ATTRIBUTE: &str = r#"
    mutation Delete($id: ID!) {
        attributeDelete(id: $id) {
            attribute { name }
        }
    }
"#;

async fn schema() -> Result<AppSchema> {
    Ok(build_schema(create_test_pool().await?))
}

async fn execute(schema: &AppSchema, query: &str, variables: Value, user: Option<User>) -> Response {
    let mut request = Request::new(query).variables(Variables::from_json(variables));
    if let Some(user) = user {
        request = request.data(user);
    }
    schema.execute(request).await
}

fn data(response: Response) -> Value {
    assert!(response.errors.is_empty(), "unexpected errors: {:?}", response.errors);
    response.data.into_json().expect("response data as JSON")
}

fn error_code(response: &Response) -> Option<String> {
    let error = response.errors.first()?;
    match error.extensions.as_ref()?.get("code")? {
        async_graphql::Value::String(code) => Some(code.clone()),
        _ => None,
    }
}

async fn create_color(schema: &AppSchema) -> Value {
    let response = execute(
        schema,
        CREATE_ATTRIBUTE,
        json!({
            "input": {
                "name": "Color",
                "values": [
                    { "name": "Red", "value": "#ff0000" },
                    { "name": "Blue", "value": "#0000ff" }
                ]
            }
        }),
        Some(staff_user()),
    )
    .await;
    data(response)["attributeCreate"]["attribute"].clone()
}

#[tokio::test]
async fn create_attribute_returns_node_with_values() -> Result<()> {
    let schema = schema().await?;
    let attribute = create_color(&schema).await;

    assert_eq!(attribute["slug"], "color");
    assert_eq!(attribute["values"][0]["slug"], "red");
    assert_eq!(attribute["values"][1]["value"], "#0000ff");
    assert!(attribute["id"].as_str().is_some_and(|id| !id.is_empty()));
    Ok(())
}

#[tokio::test]
async fn validation_errors_are_returned_in_payload() -> Result<()> {
    let schema = schema().await?;

    let response = execute(
        &schema,
        CREATE_ATTRIBUTE,
        json!({
            "input": {
                "name": "Color",
                "values": [
                    { "name": "Red", "value": "" },
                    { "name": "Red", "value": "" }
                ]
            }
        }),
        Some(staff_user()),
    )
    .await;

    let payload = data(response)["attributeCreate"].clone();
    assert!(payload["attribute"].is_null());
    assert_eq!(
        payload["errors"][0],
        json!({ "field": "values", "message": "Duplicated attribute value names provided." })
    );
    assert_eq!(
        payload["errors"][1]["message"],
        "Provided attribute value names are not unique."
    );
    Ok(())
}

#[tokio::test]
async fn mutations_without_permission_are_denied() -> Result<()> {
    let schema = schema().await?;
    let variables = json!({ "input": { "name": "Color" } });

    for user in [None, Some(customer_user())] {
        let response = execute(&schema, CREATE_ATTRIBUTE, variables.clone(), user).await;
        assert_eq!(error_code(&response).as_deref(), Some("PERMISSION_DENIED"));
    }

    let listed = data(execute(&schema, "{ attributes { slug } }", json!({}), None).await);
    assert_eq!(listed["attributes"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_adds_and_removes_values() -> Result<()> {
    let schema = schema().await?;
    let attribute = create_color(&schema).await;
    let red_id = attribute["values"][0]["id"].clone();

    let response = execute(
        &schema,
        UPDATE_ATTRIBUTE,
        json!({
            "id": attribute["id"],
            "input": {
                "name": "Colour",
                "addValues": [{ "name": "Green", "value": "#00ff00" }],
                "removeValues": [red_id]
            }
        }),
        Some(staff_user()),
    )
    .await;

    let payload = data(response)["attributeUpdate"].clone();
    assert_eq!(payload["errors"], json!([]));
    assert_eq!(payload["attribute"]["slug"], "colour");
    assert_eq!(
        payload["attribute"]["values"],
        json!([{ "name": "Blue" }, { "name": "Green" }])
    );
    Ok(())
}

#[tokio::test]
async fn update_reports_sibling_conflicts() -> Result<()> {
    let schema = schema().await?;
    let attribute = create_color(&schema).await;

    let response = execute(
        &schema,
        UPDATE_ATTRIBUTE,
        json!({
            "id": attribute["id"],
            "input": { "name": "Color", "addValues": [{ "name": "Blue", "value": "" }] }
        }),
        Some(staff_user()),
    )
    .await;

    let payload = data(response)["attributeUpdate"].clone();
    assert_eq!(payload["errors"][0]["field"], "add_values:Blue");
    assert_eq!(payload["errors"][1]["field"], "add_values:blue");
    assert!(payload["attribute"].is_null());
    Ok(())
}

#[tokio::test]
async fn delete_unknown_attribute_is_not_found() -> Result<()> {
    let schema = schema().await?;
    let missing = catalog::graphql::node::to_global_id("Attribute", "missing");

    for user in [None, Some(customer_user()), Some(staff_user())] {
        let response = execute(&schema, DELETE_ATTRIBUTE, json!({ "id": missing }), user).await;
        assert_eq!(error_code(&response).as_deref(), Some("NOT_FOUND"));
    }
    Ok(())
}

#[tokio::test]
async fn delete_attribute_then_query_returns_nothing() -> Result<()> {
    let schema = schema().await?;
    let attribute = create_color(&schema).await;
    let id = attribute["id"].clone();

    let deleted = data(
        execute(&schema, DELETE_ATTRIBUTE, json!({ "id": id }), Some(staff_user())).await,
    );
    assert_eq!(deleted["attributeDelete"]["attribute"]["name"], "Color");

    let queried = data(
        execute(
            &schema,
            "query Get($id: ID!) { attribute(id: $id) { slug } }",
            json!({ "id": id }),
            None,
        )
        .await,
    );
    assert!(queried["attribute"].is_null());
    Ok(())
}

#[tokio::test]
async fn value_lifecycle_through_api() -> Result<()> {
    let schema = schema().await?;
    let attribute = create_color(&schema).await;

    let created = data(
        execute(
            &schema,
            r#"mutation Create($input: AttributeValueCreateInput!) {
                attributeValueCreate(input: $input) {
                    errors { field }
                    attributeValue { id slug attribute { slug } }
                }
            }"#,
            json!({ "input": { "attribute": attribute["id"], "name": "Sea Green", "value": "#2e8b57" } }),
            Some(staff_user()),
        )
        .await,
    );
    let value = created["attributeValueCreate"]["attributeValue"].clone();
    assert_eq!(value["slug"], "sea-green");
    assert_eq!(value["attribute"]["slug"], "color");

    let updated = data(
        execute(
            &schema,
            r#"mutation Update($id: ID!, $input: AttributeValueUpdateInput!) {
                attributeValueUpdate(id: $id, input: $input) {
                    attributeValue { slug value }
                }
            }"#,
            json!({ "id": value["id"], "input": { "name": "Sea Green", "value": "#3cb371" } }),
            Some(staff_user()),
        )
        .await,
    );
    assert_eq!(
        updated["attributeValueUpdate"]["attributeValue"],
        json!({ "slug": "sea-green", "value": "#3cb371" })
    );

    let deleted = data(
        execute(
            &schema,
            r#"mutation Delete($id: ID!) {
                attributeValueDelete(id: $id) { attributeValue { name } }
            }"#,
            json!({ "id": value["id"] }),
            Some(staff_user()),
        )
        .await,
    );
    assert_eq!(
        deleted["attributeValueDelete"]["attributeValue"]["name"],
        "Sea Green"
    );

    let queried = data(
        execute(
            &schema,
            "query Get($id: ID!) { attributeValue(id: $id) { name } }",
            json!({ "id": value["id"] }),
            None,
        )
        .await,
    );
    assert!(queried["attributeValue"].is_null());
    Ok(())
}
