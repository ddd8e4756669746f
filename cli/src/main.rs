use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const DEFAULT_GRAPHQL_ENDPOINT: &str = "http://localhost:8000/graphql";

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Catalog CLI - Manage product attributes via HTTP", long_about = None)]
struct Cli {
    /// GraphQL API endpoint URL
    #[arg(long, default_value = DEFAULT_GRAPHQL_ENDPOINT)]
    api_url: String,

    /// Staff bearer token
    #[arg(long, env = "CATALOG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Attribute(AttributeCommands),
    #[command(subcommand)]
    Value(ValueCommands),
}

#[derive(Subcommand)]
enum AttributeCommands {
    /// List all attributes with their values
    List,
    /// Create an attribute
    Create {
        /// Name displayed in the interface
        name: String,
        /// Initial values as NAME=VALUE (repeatable)
        #[arg(short, long = "value", value_parser = parse_value_pair)]
        values: Vec<ValueInput>,
    },
    /// Rename an attribute, adding and removing values
    Update {
        /// Attribute ID
        id: String,
        /// New name
        #[arg(short, long)]
        name: String,
        /// Values to add as NAME=VALUE (repeatable)
        #[arg(short, long = "add", value_parser = parse_value_pair)]
        add: Vec<ValueInput>,
        /// IDs of values to remove (repeatable)
        #[arg(short, long = "remove")]
        remove: Vec<String>,
    },
    /// Delete an attribute and all of its values
    Delete {
        /// Attribute ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ValueCommands {
    /// Add a value to an attribute
    Create {
        /// Attribute ID
        attribute: String,
        /// Name displayed in the interface
        name: String,
        /// Raw value, e.g. a HEX colour
        #[arg(default_value = "")]
        value: String,
    },
    /// Update a value's name and raw value
    Update {
        /// Value ID
        id: String,
        name: String,
        #[arg(default_value = "")]
        value: String,
    },
    /// Delete a value
    Delete {
        /// Value ID
        id: String,
    },
}

#[derive(Clone, Debug, Serialize)]
struct ValueInput {
    name: String,
    value: String,
}

fn parse_value_pair(raw: &str) -> Result<ValueInput, String> {
    let (name, value) = raw.split_once('=').unwrap_or((raw, ""));
    if name.trim().is_empty() {
        return Err(format!("value '{raw}' must look like NAME=VALUE"));
    }
    Ok(ValueInput {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[derive(Serialize)]
struct GraphQLRequest {
    query: &'static str,
    variables: Value,
}

#[derive(Deserialize, Debug)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct GraphQLResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Deserialize, Debug)]
struct GraphQLError {
    message: String,
}

#[derive(Deserialize, Debug)]
struct FieldError {
    field: String,
    message: String,
}

#[derive(Deserialize, Debug)]
struct AttributeNode {
    id: String,
    name: String,
    slug: String,
    #[serde(default)]
    values: Vec<ValueNode>,
}

#[derive(Deserialize, Debug)]
struct ValueNode {
    id: String,
    name: String,
    slug: String,
    #[serde(default)]
    value: String,
}

#[derive(Deserialize, Debug)]
struct AttributePayload {
    #[serde(default)]
    errors: Vec<FieldError>,
    attribute: Option<AttributeNode>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ValuePayload {
    #[serde(default)]
    errors: Vec<FieldError>,
    attribute_value: Option<ValueNode>,
}

struct Client {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl Client {
    async fn execute<T: DeserializeOwned>(&self, query: &'static str, variables: Value) -> Result<T> {
        let mut request = self
            .http
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .json(&GraphQLRequest { query, variables });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to GraphQL API")?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "GraphQL request failed with status: {}",
                response.status()
            ));
        }

        let graphql_response: GraphQLResponse<T> = response
            .json()
            .await
            .context("Failed to parse GraphQL response")?;

        if !graphql_response.errors.is_empty() {
            let error_messages: Vec<String> = graphql_response
                .errors
                .iter()
                .map(|e| e.message.clone())
                .collect();
            return Err(anyhow::anyhow!(
                "GraphQL errors: {}",
                error_messages.join(", ")
            ));
        }

        graphql_response
            .data
            .context("No data returned from GraphQL")
    }

    /// Run a mutation and pull its payload out of the `field` key.
    async fn mutate<T: DeserializeOwned>(
        &self,
        query: &'static str,
        field: &str,
        variables: Value,
    ) -> Result<T> {
        let mut data: Value = self.execute(query, variables).await?;
        let payload = data
            .get_mut(field)
            .map(Value::take)
            .with_context(|| format!("response is missing `{field}`"))?;
        serde_json::from_value(payload).context("Failed to decode mutation payload")
    }
}

fn ensure_no_field_errors(errors: &[FieldError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    for error in errors {
        eprintln!("  {}: {}", error.field, error.message);
    }
    Err(anyhow::anyhow!("request rejected with {} error(s)", errors.len()))
}

fn print_attribute(attribute: &AttributeNode) {
    println!("  ID:   {}", attribute.id);
    println!("  Name: {}", attribute.name);
    println!("  Slug: {}", attribute.slug);
    for value in &attribute.values {
        println!("    - {} ({}) = {:?}  [{}]", value.name, value.slug, value.value, value.id);
    }
}

fn print_value(value: &ValueNode) {
    println!("  ID:    {}", value.id);
    println!("  Name:  {}", value.name);
    println!("  Slug:  {}", value.slug);
    println!("  Value: {}", value.value);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client {
        http: reqwest::Client::new(),
        api_url: cli.api_url,
        token: cli.token,
    };

    match cli.command {
        Commands::Attribute(cmd) => match cmd {
            AttributeCommands::List => list_attributes(&client).await?,
            AttributeCommands::Create { name, values } => {
                create_attribute(&client, name, values).await?
            }
            AttributeCommands::Update {
                id,
                name,
                add,
                remove,
            } => update_attribute(&client, id, name, add, remove).await?,
            AttributeCommands::Delete { id } => delete_attribute(&client, id).await?,
        },
        Commands::Value(cmd) => match cmd {
            ValueCommands::Create {
                attribute,
                name,
                value,
            } => create_value(&client, attribute, name, value).await?,
            ValueCommands::Update { id, name, value } => {
                update_value(&client, id, name, value).await?
            }
            ValueCommands::Delete { id } => delete_value(&client, id).await?,
        },
    }

    Ok(())
}

async fn list_attributes(client: &Client) -> Result<()> {
    #[derive(Deserialize)]
    struct ListResponse {
        attributes: Vec<AttributeNode>,
    }

    let data: ListResponse = client
        .execute(
            "query { attributes { id name slug values { id name slug value } } }",
            json!({}),
        )
        .await?;

    if data.attributes.is_empty() {
        println!("No attributes defined.");
    }
    for attribute in &data.attributes {
        print_attribute(attribute);
    }
    Ok(())
}

async fn create_attribute(client: &Client, name: String, values: Vec<ValueInput>) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeCreate($input: AttributeCreateInput!) {
            attributeCreate(input: $input) {
                errors { field message }
                attribute { id name slug values { id name slug value } }
            }
        }
    "#;

    let payload: AttributePayload = client
        .mutate(
            QUERY,
            "attributeCreate",
            json!({ "input": { "name": name, "values": values } }),
        )
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let attribute = payload.attribute.context("No attribute returned")?;
    println!("✓ Attribute created successfully!");
    print_attribute(&attribute);
    Ok(())
}

async fn update_attribute(
    client: &Client,
    id: String,
    name: String,
    add: Vec<ValueInput>,
    remove: Vec<String>,
) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeUpdate($id: ID!, $input: AttributeUpdateInput!) {
            attributeUpdate(id: $id, input: $input) {
                errors { field message }
                attribute { id name slug values { id name slug value } }
            }
        }
    "#;

    let payload: AttributePayload = client
        .mutate(
            QUERY,
            "attributeUpdate",
            json!({
                "id": id,
                "input": { "name": name, "addValues": add, "removeValues": remove }
            }),
        )
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let attribute = payload.attribute.context("No attribute returned")?;
    println!("✓ Attribute updated successfully!");
    print_attribute(&attribute);
    Ok(())
}

async fn delete_attribute(client: &Client, id: String) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeDelete($id: ID!) {
            attributeDelete(id: $id) {
                errors { field message }
                attribute { id name slug }
            }
        }
    "#;

    let payload: AttributePayload = client
        .mutate(QUERY, "attributeDelete", json!({ "id": id }))
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let attribute = payload.attribute.context("No attribute returned")?;
    println!("✓ Attribute {} ({}) deleted", attribute.name, attribute.slug);
    Ok(())
}

async fn create_value(client: &Client, attribute: String, name: String, value: String) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeValueCreate($input: AttributeValueCreateInput!) {
            attributeValueCreate(input: $input) {
                errors { field message }
                attributeValue { id name slug value }
            }
        }
    "#;

    let payload: ValuePayload = client
        .mutate(
            QUERY,
            "attributeValueCreate",
            json!({ "input": { "attribute": attribute, "name": name, "value": value } }),
        )
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let value = payload.attribute_value.context("No value returned")?;
    println!("✓ Value created successfully!");
    print_value(&value);
    Ok(())
}

async fn update_value(client: &Client, id: String, name: String, value: String) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeValueUpdate($id: ID!, $input: AttributeValueUpdateInput!) {
            attributeValueUpdate(id: $id, input: $input) {
                errors { field message }
                attributeValue { id name slug value }
            }
        }
    "#;

    let payload: ValuePayload = client
        .mutate(
            QUERY,
            "attributeValueUpdate",
            json!({ "id": id, "input": { "name": name, "value": value } }),
        )
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let value = payload.attribute_value.context("No value returned")?;
    println!("✓ Value updated successfully!");
    print_value(&value);
    Ok(())
}

async fn delete_value(client: &Client, id: String) -> Result<()> {
    const QUERY: &str = r#"
        mutation AttributeValueDelete($id: ID!) {
            attributeValueDelete(id: $id) {
                errors { field message }
                attributeValue { id name slug value }
            }
        }
    "#;

    let payload: ValuePayload = client
        .mutate(QUERY, "attributeValueDelete", json!({ "id": id }))
        .await?;
    ensure_no_field_errors(&payload.errors)?;

    let value = payload.attribute_value.context("No value returned")?;
    println!("✓ Value {} deleted", value.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pairs() {
        let pair = parse_value_pair("Red=#ff0000").unwrap();
        assert_eq!(pair.name, "Red");
        assert_eq!(pair.value, "#ff0000");

        let bare = parse_value_pair("XL").unwrap();
        assert_eq!(bare.name, "XL");
        assert_eq!(bare.value, "");

        assert!(parse_value_pair("=oops").is_err());
    }

    #[test]
    fn payload_errors_are_decoded() {
        let payload: AttributePayload = serde_json::from_value(json!({
            "errors": [{ "field": "values", "message": "Duplicated attribute value names provided." }],
            "attribute": null
        }))
        .unwrap();
        assert!(payload.attribute.is_none());
        assert!(ensure_no_field_errors(&payload.errors).is_err());
    }
}
