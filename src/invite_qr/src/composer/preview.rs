use anyhow::{bail, Result};
use qrcode::render::unicode;
use qrcode::QrCode;

use super::error::ComposerError;
use super::ErrorCorrection;

/// Render the symbol for `payload` as a Unicode string for terminal display.
///
/// Uses half-block characters, packing two module rows into each text line.
pub fn render_to_terminal(payload: &str, level: ErrorCorrection) -> Result<String> {
    let code = match QrCode::with_error_correction_level(payload, level.to_ec_level()) {
        Ok(code) => code,
        Err(e) => bail!(ComposerError::Encoding(e.to_string())),
    };
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Dark)
        .light_color(unicode::Dense1x2::Light)
        .build())
}
