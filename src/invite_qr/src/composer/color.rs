use anyhow::{bail, Result};
use image::Rgba;

use super::error::ComposerError;

/// Parse a `#RRGGBB` hex string into an opaque RGBA pixel. The leading `#`
/// is optional.
pub(crate) fn parse_hex_color(value: &str) -> Result<Rgba<u8>> {
    let digits = value.trim().trim_start_matches('#');
    if digits.len() != 6 {
        bail!(ComposerError::InvalidOptions(format!(
            "invalid hex color: {value}"
        )));
    }
    let bytes = match hex::decode(digits) {
        Ok(bytes) => bytes,
        Err(_) => bail!(ComposerError::InvalidOptions(format!(
            "invalid hex color: {value}"
        ))),
    };
    Ok(Rgba([bytes[0], bytes[1], bytes[2], 255]))
}
