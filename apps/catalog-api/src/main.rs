use catalog_api::EndpointConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    catalog_api::init_tracing();

    info!("Starting Vitrine catalog API...");

    let config = EndpointConfig::load()?;
    catalog_api::run(config).await
}
