pub mod color;
pub mod encode;
pub mod error;
pub mod logo;
pub mod monogram;
pub mod preview;

use core::fmt;
use std::str::FromStr;

use anyhow::{bail, Result};
use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::error::ComposerError;
use self::logo::LogoSource;

use super::constants::{
    DEFAULT_CORNER_RADIUS, DEFAULT_DARK_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_FRACTION,
    DEFAULT_LIGHT_COLOR, DEFAULT_LOGO_BACKGROUND, DEFAULT_LOGO_MARGIN_FRACTION,
    DEFAULT_LOGO_SIZE_FRACTION, DEFAULT_MARGIN_MODULES, DEFAULT_MONOGRAM_BACKGROUND,
    DEFAULT_PADDING_FRACTION, DEFAULT_TEXT_COLOR, DEFAULT_WIDTH,
};

pub struct QrComposer {
    /// The client used to fetch remote logo images.
    client: reqwest::Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCorrection::Low => write!(f, "l"),
            ErrorCorrection::Medium => write!(f, "m"),
            ErrorCorrection::Quartile => write!(f, "q"),
            ErrorCorrection::High => write!(f, "h"),
        }
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrection::Low),
            "m" | "medium" => Ok(ErrorCorrection::Medium),
            "q" | "quartile" => Ok(ErrorCorrection::Quartile),
            "h" | "high" => Ok(ErrorCorrection::High),
            _ => Err(format!("Unknown error correction level: {s}")),
        }
    }
}

/// How the base symbol is rasterized: output width in pixels, quiet zone in
/// modules, module and background colors, redundancy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub width: u32,
    pub margin: u32,
    pub dark_color: String,
    pub light_color: String,
    pub error_correction: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            width: DEFAULT_WIDTH,
            margin: DEFAULT_MARGIN_MODULES,
            dark_color: DEFAULT_DARK_COLOR.to_string(),
            light_color: DEFAULT_LIGHT_COLOR.to_string(),
            error_correction: ErrorCorrection::Medium,
        }
    }
}

impl RenderOptions {
    fn validate(&self) -> Result<()> {
        if self.width == 0 {
            bail!(ComposerError::InvalidOptions(
                "width must be at least 1 pixel".to_string()
            ));
        }
        color::parse_hex_color(&self.dark_color)?;
        color::parse_hex_color(&self.light_color)?;
        Ok(())
    }
}

/// A logo embedded in the center of the symbol. `source` is either a local
/// file path or an http(s) URL; the fractions are relative to the output
/// width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoOptions {
    pub source: String,
    pub size_fraction: f32,
    pub margin_fraction: f32,
    pub background_color: String,
}

impl LogoOptions {
    pub fn new(source: impl Into<String>) -> LogoOptions {
        LogoOptions {
            source: source.into(),
            size_fraction: DEFAULT_LOGO_SIZE_FRACTION,
            margin_fraction: DEFAULT_LOGO_MARGIN_FRACTION,
            background_color: DEFAULT_LOGO_BACKGROUND.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.source.is_empty() {
            bail!(ComposerError::InvalidOptions(
                "logo source must not be empty".to_string()
            ));
        }
        validate_fraction("logo size", self.size_fraction)?;
        validate_fraction("logo margin", self.margin_fraction)?;
        color::parse_hex_color(&self.background_color)?;
        Ok(())
    }
}

/// A short text monogram embedded in the center of the symbol, rendered on
/// a rounded rectangle. The fractions are relative to the output width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonogramOptions {
    pub text: String,
    pub font_size_fraction: f32,
    pub font_family: String,
    pub text_color: String,
    pub background_color: String,
    pub corner_radius: u32,
    pub padding_fraction: f32,
}

impl MonogramOptions {
    pub fn new(text: impl Into<String>) -> MonogramOptions {
        MonogramOptions {
            text: text.into(),
            font_size_fraction: DEFAULT_FONT_SIZE_FRACTION,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            background_color: DEFAULT_MONOGRAM_BACKGROUND.to_string(),
            corner_radius: DEFAULT_CORNER_RADIUS,
            padding_fraction: DEFAULT_PADDING_FRACTION,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.text.is_empty() {
            bail!(ComposerError::InvalidOptions(
                "monogram text must not be empty".to_string()
            ));
        }
        validate_fraction("font size", self.font_size_fraction)?;
        validate_fraction("padding", self.padding_fraction)?;
        color::parse_hex_color(&self.text_color)?;
        color::parse_hex_color(&self.background_color)?;
        Ok(())
    }
}

/// What gets composited over the middle of the symbol.
///
/// Anything other than `None` obscures modules, so the caller is expected to
/// pick an error correction level and a size fraction the symbol can absorb
/// (level M or H with fractions of about 0.25 or less).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CenterContent {
    None,
    Logo(LogoOptions),
    Monogram(MonogramOptions),
}

impl QrComposer {
    pub fn new() -> QrComposer {
        QrComposer {
            client: reqwest::Client::new(),
        }
    }

    /// Render a QR symbol for `url` as PNG bytes, optionally compositing a
    /// logo or monogram over its center.
    ///
    /// # Arguments
    ///
    /// * `url` - The payload to encode. Expected to be a complete URL but any
    ///   non-empty string is accepted and encoded literally.
    /// * `options` - Output width, quiet zone, colors and error correction.
    /// * `center` - The center content variant to composite, if any.
    ///
    /// # Returns
    ///
    /// PNG bytes of the final image, always `options.width` pixels square.
    /// Fails without producing any bytes; a failed overlay is never silently
    /// replaced by a bare code.
    pub async fn render(
        &self,
        url: &str,
        options: &RenderOptions,
        center: &CenterContent,
    ) -> Result<Vec<u8>> {
        if url.is_empty() {
            bail!(ComposerError::InvalidOptions(
                "payload must not be empty".to_string()
            ));
        }
        options.validate()?;

        let mut base = encode::render_symbol(url, options)?;

        match center {
            CenterContent::None => {}
            CenterContent::Logo(logo_options) => {
                logo_options.validate()?;
                let source = LogoSource::resolve(&logo_options.source);
                debug!("Logo source resolved as {}", source);
                let bytes = self.read_logo(&source).await?;
                let badge = logo::compose_badge(&bytes, logo_options, options.width)?;
                overlay_centered(&mut base, &badge);
            }
            CenterContent::Monogram(monogram_options) => {
                monogram_options.validate()?;
                let badge = monogram::compose_badge(monogram_options, options.width)?;
                overlay_centered(&mut base, &badge);
            }
        }

        encode::to_png_bytes(&base)
    }
}

/// Composite `badge` over the middle of `base`. The badge's top-left corner
/// lands at floor((base side - badge side) / 2) on both axes.
fn overlay_centered(base: &mut RgbaImage, badge: &RgbaImage) {
    let x = (base.width().saturating_sub(badge.width()) / 2) as i64;
    let y = (base.height().saturating_sub(badge.height()) / 2) as i64;
    imageops::overlay(base, badge, x, y);
}

fn validate_fraction(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value >= 1.0 {
        bail!(ComposerError::InvalidOptions(format!(
            "{name} must be a fraction between 0 and 1, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAYLOAD: &str = "https://example.com/i/abc123";

    fn sample_png(color: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(16, 16, Rgba(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn decode(png: &[u8]) -> RgbaImage {
        image::load_from_memory(png).unwrap().to_rgba8()
    }

    #[tokio::test]
    async fn test_render_plain_dimensions() {
        let composer = QrComposer::new();
        let png = composer
            .render(PAYLOAD, &RenderOptions::default(), &CenterContent::None)
            .await
            .unwrap();
        let img = decode(&png);
        assert_eq!(img.dimensions(), (300, 300));
    }

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let composer = QrComposer::new();
        let options = RenderOptions::default();
        let first = composer
            .render(PAYLOAD, &options, &CenterContent::None)
            .await
            .unwrap();
        let second = composer
            .render(PAYLOAD, &options, &CenterContent::None)
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_render_rejects_empty_payload() {
        let composer = QrComposer::new();
        let err = composer
            .render("", &RenderOptions::default(), &CenterContent::None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposerError>(),
            Some(ComposerError::InvalidOptions(_))
        ));
    }

    #[tokio::test]
    async fn test_render_rejects_malformed_color() {
        let composer = QrComposer::new();
        let options = RenderOptions {
            dark_color: "#12345".to_string(),
            ..RenderOptions::default()
        };
        let err = composer
            .render(PAYLOAD, &options, &CenterContent::None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposerError>(),
            Some(ComposerError::InvalidOptions(_))
        ));
    }

    #[tokio::test]
    async fn test_render_rejects_empty_monogram() {
        let composer = QrComposer::new();
        let err = composer
            .render(
                PAYLOAD,
                &RenderOptions::default(),
                &CenterContent::Monogram(MonogramOptions::new("")),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposerError>(),
            Some(ComposerError::InvalidOptions(_))
        ));
    }

    #[tokio::test]
    async fn test_monogram_container_is_distinct_from_modules() {
        let composer = QrComposer::new();
        let options = RenderOptions::default();
        let mut monogram = MonogramOptions::new("M&E");
        monogram.background_color = "#FF0000".to_string();

        let png = composer
            .render(PAYLOAD, &options, &CenterContent::Monogram(monogram))
            .await
            .unwrap();
        let img = decode(&png);
        assert_eq!(img.dimensions(), (300, 300));

        // Container side is 0.15 * 300 + 2 * 0.05 * 300 = 75 pixels, centered.
        // The pixel in the middle of the container sits on the background
        // fill for any font, so it must carry the container color.
        let center = img.get_pixel(150, 150);
        let is_container = center.0 == [255, 0, 0, 255];
        // The glyph may cover the exact center; the padding band above the
        // text baseline cannot be covered.
        let pad = img.get_pixel(150, 150 - 37 + 4);
        assert!(is_container || pad.0 == [255, 0, 0, 255]);
        // Neither module color ever equals the container background.
        assert_ne!(center.0, [0, 0, 0, 0]);
    }

    #[tokio::test]
    async fn test_monogram_leaves_surrounding_modules_untouched() {
        let composer = QrComposer::new();
        let options = RenderOptions::default();
        let plain = decode(
            &composer
                .render(PAYLOAD, &options, &CenterContent::None)
                .await
                .unwrap(),
        );
        let composed = decode(
            &composer
                .render(
                    PAYLOAD,
                    &options,
                    &CenterContent::Monogram(MonogramOptions::new("M&E")),
                )
                .await
                .unwrap(),
        );

        // Container is 75 pixels wide, top-left at (112, 112). Everything
        // outside that box matches the plain rendering exactly.
        for (x, y) in [(0u32, 0u32), (50, 50), (111, 111), (188, 188), (299, 299)] {
            assert_eq!(plain.get_pixel(x, y), composed.get_pixel(x, y));
        }
    }

    #[tokio::test]
    async fn test_logo_badge_placement() {
        let logo_png = sample_png([255, 0, 0, 255]);
        let dir = std::env::temp_dir().join("invite_qr_logo_placement_test");
        std::fs::create_dir_all(&dir).unwrap();
        let logo_path = dir.join("logo.png");
        std::fs::write(&logo_path, &logo_png).unwrap();

        let composer = QrComposer::new();
        let options = RenderOptions::default();
        let mut logo = LogoOptions::new(logo_path.to_string_lossy().to_string());
        logo.background_color = "#00FF00".to_string();

        let plain = decode(
            &composer
                .render(PAYLOAD, &options, &CenterContent::None)
                .await
                .unwrap(),
        );
        let composed = decode(
            &composer
                .render(PAYLOAD, &options, &CenterContent::Logo(logo))
                .await
                .unwrap(),
        );

        // Badge side is 0.20 * 300 + 2 * 0.05 * 300 = 90 pixels, so the
        // top-left corner must land at floor((300 - 90) / 2) = 105.
        assert_eq!(composed.get_pixel(105, 105).0, [0, 255, 0, 255]);
        assert_eq!(composed.get_pixel(194, 194).0, [0, 255, 0, 255]);
        assert_eq!(composed.get_pixel(104, 104), plain.get_pixel(104, 104));
        assert_eq!(composed.get_pixel(195, 195), plain.get_pixel(195, 195));
        // The logo itself fills the middle of the matte.
        assert_eq!(composed.get_pixel(150, 150).0, [255, 0, 0, 255]);
    }

    #[tokio::test]
    async fn test_missing_local_logo_is_not_found() {
        let composer = QrComposer::new();
        let logo = LogoOptions::new("/definitely/not/a/real/logo.png");
        let err = composer
            .render(PAYLOAD, &RenderOptions::default(), &CenterContent::Logo(logo))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposerError>(),
            Some(ComposerError::LogoNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remote_logo_is_fetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(
                ResponseTemplate::new(200).set_body_bytes(sample_png([0, 0, 255, 255])),
            )
            .mount(&server)
            .await;

        let composer = QrComposer::new();
        let logo = LogoOptions::new(format!("{}/logo.png", server.uri()));
        let png = composer
            .render(PAYLOAD, &RenderOptions::default(), &CenterContent::Logo(logo))
            .await
            .unwrap();
        let img = decode(&png);
        assert_eq!(img.dimensions(), (300, 300));
        assert_eq!(img.get_pixel(150, 150).0, [0, 0, 255, 255]);
    }

    #[tokio::test]
    async fn test_remote_logo_error_status_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logo.png"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let composer = QrComposer::new();
        let logo = LogoOptions::new(format!("{}/logo.png", server.uri()));
        let err = composer
            .render(PAYLOAD, &RenderOptions::default(), &CenterContent::Logo(logo))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ComposerError>(),
            Some(ComposerError::LogoFetch(_))
        ));
    }

    #[test]
    fn test_error_correction_from_str() {
        assert_eq!("m".parse::<ErrorCorrection>(), Ok(ErrorCorrection::Medium));
        assert_eq!("H".parse::<ErrorCorrection>(), Ok(ErrorCorrection::High));
        assert_eq!(
            "quartile".parse::<ErrorCorrection>(),
            Ok(ErrorCorrection::Quartile)
        );
        assert!("x".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn test_fraction_bounds() {
        assert!(validate_fraction("test", 0.2).is_ok());
        assert!(validate_fraction("test", 0.0).is_err());
        assert!(validate_fraction("test", 1.0).is_err());
        assert!(validate_fraction("test", f32::NAN).is_err());
    }
}
