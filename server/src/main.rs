use anyhow::Result;
use tokio_util::sync::CancellationToken;

use catalog::api::{ApiState, run_api};
use catalog::auth::StaffDirectory;
use catalog::graphql::build_schema;
use catalog::{config, db, metrics_exporter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::loader::load_with_discovery()?;
    metrics_exporter::init_metrics()?;

    let pool = db::init_pool().await?;

    let staff = StaffDirectory::from_accounts(&config.staff);
    if staff.is_empty() {
        tracing::warn!("no staff tokens configured, every mutation will be rejected");
    }

    let state = ApiState::new(build_schema(pool), staff);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            signal.cancel();
        }
    });

    run_api(state, &config.server.bind, shutdown).await
}
