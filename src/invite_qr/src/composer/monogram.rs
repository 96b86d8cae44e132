use std::sync::Arc;

use anyhow::{bail, Context, Result};
use image::{Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};

use super::error::ComposerError;
use super::MonogramOptions;

lazy_static::lazy_static! {
    static ref FONTS: Arc<usvg::fontdb::Database> = {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    };
}

/// Render the monogram badge: a rounded rectangle with the text centered in
/// it, rasterized at 1:1 pixel scale of the container.
///
/// The container side is `font size + 2 * padding`, both resolved against
/// the output width.
pub(crate) fn compose_badge(options: &MonogramOptions, width: u32) -> Result<RgbaImage> {
    let font_size = options.font_size_fraction * width as f32;
    let padding = options.padding_fraction * width as f32;
    let side = (font_size + 2.0 * padding).round().max(1.0) as u32;

    let markup = badge_markup(options, side, font_size);

    let mut svg_options = usvg::Options::default();
    svg_options.font_family = options.font_family.clone();
    svg_options.fontdb = FONTS.clone();

    let tree = usvg::Tree::from_str(&markup, &svg_options)
        .context("Failed to parse monogram markup")?;
    let mut pixmap = match tiny_skia::Pixmap::new(side, side) {
        Some(pixmap) => pixmap,
        None => bail!(ComposerError::InvalidOptions(format!(
            "monogram container of {side} pixels is not renderable"
        ))),
    };
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let mut badge = RgbaImage::new(side, side);
    for (pixel, out) in pixmap.pixels().iter().zip(badge.pixels_mut()) {
        let color = pixel.demultiply();
        *out = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    Ok(badge)
}

fn badge_markup(options: &MonogramOptions, side: u32, font_size: f32) -> String {
    let center = side as f32 / 2.0;
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{side}\" height=\"{side}\" viewBox=\"0 0 {side} {side}\">\
         <rect width=\"{side}\" height=\"{side}\" rx=\"{radius}\" fill=\"{background}\"/>\
         <text x=\"{center}\" y=\"{center}\" text-anchor=\"middle\" dominant-baseline=\"central\" \
         font-family=\"{family}\" font-size=\"{font_size}\" font-weight=\"bold\" \
         fill=\"{color}\">{text}</text>\
         </svg>",
        side = side,
        center = center,
        radius = options.corner_radius,
        background = options.background_color,
        family = escape_xml(&options.font_family),
        font_size = font_size,
        color = options.text_color,
        text = escape_xml(&options.text),
    )
}

/// Escape the XML special characters the monogram text may contain, so
/// "M&E" stays literal in the markup. Ampersands go first.
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
