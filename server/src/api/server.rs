use std::sync::Arc;

use anyhow::{Context, Result};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{get, post};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use super::playground::graphql_playground;
use crate::auth::StaffDirectory;
use crate::graphql::AppSchema;
use crate::metrics_exporter::render_metrics;

#[derive(Clone)]
pub struct ApiState {
    pub schema: AppSchema,
    pub staff: Arc<StaffDirectory>,
}

impl ApiState {
    pub fn new(schema: AppSchema, staff: StaffDirectory) -> Self {
        Self {
            schema,
            staff: Arc::new(staff),
        }
    }
}

/// Execute a GraphQL request, attaching the authenticated staff member when
/// the request carries a known bearer token.
pub async fn graphql_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    let user = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| state.staff.authenticate_header(value));
    if let Some(user) = user {
        request = request.data(user.clone());
    }

    state.schema.execute(request).await.into()
}

pub async fn graphql_options() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn metrics_handler() -> String {
    render_metrics()
}

pub fn build_api_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(graphql_playground))
        .route("/graphql", post(graphql_handler).options(graphql_options))
        .route("/metrics", get(metrics_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS]),
        )
        .with_state(state)
}

pub async fn run_api(state: ApiState, bind: &str, shutdown: CancellationToken) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind API listener on {bind}"))?;
    tracing::info!("GraphQL API listening on http://{}/graphql", listener.local_addr()?);

    axum::serve(listener, build_api_router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
