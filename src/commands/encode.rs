use anyhow::Result;
use tracing::info;

use invite_qr::composer::preview::render_to_terminal;

use crate::{cli::EncodeArgs, commands::render_to_file};

pub async fn handle(args: EncodeArgs) -> Result<()> {
    info!("Rendering code for {}", args.payload);

    let options = args.render.to_options()?;
    let center = args.center.to_center_content(None);

    if args.preview {
        println!("{}", render_to_terminal(&args.payload, options.error_correction)?);
    }

    render_to_file(
        &args.payload,
        &options,
        &center,
        args.center.fallback_plain,
        &args.output,
    )
    .await
}
