//! ndi - Nexus Dashboard Insights compliance analysis CLI

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    ndi_cli::run().await
}
