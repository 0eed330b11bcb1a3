use iou_contract::{api::Server, config::Config, IOU_CONTRACT_ID};
use tracing::info;

/// Entry point for the verifier service.
///
/// Initializes logging, loads the configuration and serves the verification
/// API until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(&path)?;
    info!("Verifier for {} starting with config: {:?}", IOU_CONTRACT_ID, config);

    let server = Server::new(config);
    server.start().await?;

    Ok(())
}
