use anyhow::Result;
use tracing::info;

use crate::{cli::ConfigArgs, settings::Settings, AppCtx};

pub async fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    ctx.settings_store.save(&Settings {
        frontend_url: Some(args.frontend_url),
        monogram: args.monogram,
    })?;
    info!("Configuration saved successfully ✅");
    Ok(())
}
