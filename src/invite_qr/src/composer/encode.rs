use anyhow::{bail, Context, Result};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use qrcode::{Color, QrCode};

use super::color::parse_hex_color;
use super::error::ComposerError;
use super::RenderOptions;

/// Rasterize the QR symbol for `payload` into an RGBA buffer of exactly
/// `options.width` pixels per side, with a quiet zone of `options.margin`
/// modules on every edge.
///
/// Pixels are mapped back onto the module grid, so the output width is
/// honored exactly no matter which symbol version the encoder picks.
pub(crate) fn render_symbol(payload: &str, options: &RenderOptions) -> Result<RgbaImage> {
    let code =
        match QrCode::with_error_correction_level(payload, options.error_correction.to_ec_level())
        {
            Ok(code) => code,
            Err(e) => bail!(ComposerError::Encoding(e.to_string())),
        };

    let dark = parse_hex_color(&options.dark_color)?;
    let light = parse_hex_color(&options.light_color)?;

    let modules = code.to_colors();
    let size = code.width() as u32;
    let total = size + 2 * options.margin;
    let width = options.width;

    let mut img = RgbaImage::from_pixel(width, width, light);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let module_x = (x as u64 * total as u64 / width as u64) as i64 - options.margin as i64;
        let module_y = (y as u64 * total as u64 / width as u64) as i64 - options.margin as i64;
        if module_x < 0 || module_y < 0 || module_x >= size as i64 || module_y >= size as i64 {
            continue;
        }
        if modules[module_y as usize * size as usize + module_x as usize] == Color::Dark {
            *pixel = dark;
        }
    }

    Ok(img)
}

/// Encode an RGBA buffer as PNG bytes in memory.
pub(crate) fn to_png_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::Rgba8,
        )
        .context("Failed to encode PNG")?;
    Ok(buffer)
}
