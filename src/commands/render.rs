use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use invite_qr::composer::error::ComposerError;
use invite_qr::composer::{CenterContent, RenderOptions};
use tracing::{info, warn};

/// Render `url` and write the PNG to `output`.
///
/// With `fallback_plain` set, a center overlay whose logo cannot be loaded
/// degrades to a bare code instead of failing the command. Invalid options
/// still fail either way.
pub(crate) async fn render_to_file(
    url: &str,
    options: &RenderOptions,
    center: &CenterContent,
    fallback_plain: bool,
    output: &Path,
) -> Result<()> {
    let composer = invite_qr::get_composer();
    let png = match composer.render(url, options, center).await {
        Ok(png) => png,
        Err(e) if fallback_plain && is_center_failure(&e) => {
            warn!("Center content failed ({e:#}), falling back to a bare code");
            composer.render(url, options, &CenterContent::None).await?
        }
        Err(e) => return Err(e),
    };

    fs::write(output, &png).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {} ({} bytes)", output.display(), png.len());
    Ok(())
}

fn is_center_failure(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<ComposerError>(),
        Some(ComposerError::LogoNotFound(_)) | Some(ComposerError::LogoFetch(_))
    )
}
