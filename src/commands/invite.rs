use anyhow::Result;
use tracing::{info, warn};

use invite_qr::composer::preview::render_to_terminal;

use crate::{cli::InviteArgs, commands::render_to_file, AppCtx};

pub async fn handle(args: InviteArgs, ctx: &AppCtx) -> Result<()> {
    let settings = ctx.settings_store.load()?;
    let Some(frontend_url) = settings.frontend_url else {
        warn!("Please configure the frontend URL with `invite-qr config --frontend-url <URL>`");
        return Ok(());
    };

    let url = format!(
        "{}/invitation/{}",
        frontend_url.trim_end_matches('/'),
        args.slug
    );
    info!("Rendering invitation code for {}", url);

    let options = args.render.to_options()?;
    let center = args.center.to_center_content(settings.monogram.as_deref());

    if args.preview {
        println!("{}", render_to_terminal(&url, options.error_correction)?);
    }

    render_to_file(
        &url,
        &options,
        &center,
        args.center.fallback_plain,
        &args.output,
    )
    .await
}
