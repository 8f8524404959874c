use anyhow::Result;
use chapka::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
