use clap::Parser;
use climate_summary::cli::{run, Cli};
use climate_summary::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
