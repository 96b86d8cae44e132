use anyhow::Result;
use clap::Parser;

use invite_qr_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let cli = invite_qr_cli::cli::Cli::parse();
    invite_qr_cli::run(cli).await?;
    Ok(())
}
