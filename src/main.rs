use anyhow::Result;
use basal_chart::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    basal_chart::run(cli).await
}
