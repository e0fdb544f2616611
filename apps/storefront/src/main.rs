//! # Storefront Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (`VITRINE_CONFIG` or the platform default path)
//! 3. Hand over to [`storefront::run`]

use std::path::PathBuf;

use storefront::StorefrontConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront::init_tracing();

    let config_path = std::env::var("VITRINE_CONFIG").ok().map(PathBuf::from);
    let config = StorefrontConfig::load(config_path)?;

    storefront::run(config).await
}
