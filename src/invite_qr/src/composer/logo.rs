use core::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::color::parse_hex_color;
use super::error::ComposerError;
use super::{LogoOptions, QrComposer};

/// Where the logo bytes come from. A source starting with an http(s) scheme
/// is fetched over the network; everything else is treated as a local file
/// path.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoSource {
    Remote(String),
    Local(PathBuf),
}

impl LogoSource {
    pub fn resolve(raw: &str) -> LogoSource {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            LogoSource::Remote(raw.to_string())
        } else {
            LogoSource::Local(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for LogoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoSource::Remote(url) => write!(f, "remote url {}", url),
            LogoSource::Local(path) => write!(f, "local file {}", path.display()),
        }
    }
}

impl QrComposer {
    /// Load the raw logo bytes for `source`, either over HTTP or from disk.
    pub(crate) async fn read_logo(&self, source: &LogoSource) -> Result<Vec<u8>> {
        match source {
            LogoSource::Remote(url) => {
                let response = match self.client.get(url).send().await {
                    Ok(response) => response,
                    Err(e) => bail!(ComposerError::LogoFetch(format!("{url}: {e}"))),
                };
                let status = response.status();
                if !status.is_success() {
                    bail!(ComposerError::LogoFetch(format!(
                        "{url} returned status {status}"
                    )));
                }
                match response.bytes().await {
                    Ok(bytes) => Ok(bytes.to_vec()),
                    Err(e) => bail!(ComposerError::LogoFetch(format!("{url}: {e}"))),
                }
            }
            LogoSource::Local(path) => match fs::read(path) {
                Ok(bytes) => Ok(bytes),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    bail!(ComposerError::LogoNotFound(path.clone()))
                }
                Err(e) => Err(e)
                    .with_context(|| format!("Failed to read logo file {}", path.display())),
            },
        }
    }
}

/// Build the opaque center badge: the logo contain-fitted into its target
/// square, centered on a solid matte of side `target + 2 * margin` so it
/// stays legible against the modules behind it.
pub(crate) fn compose_badge(bytes: &[u8], options: &LogoOptions, width: u32) -> Result<RgbaImage> {
    let background = parse_hex_color(&options.background_color)?;
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(e) => bail!(ComposerError::InvalidOptions(format!(
            "logo is not a decodable image: {e}"
        ))),
    };

    let target = (options.size_fraction * width as f32).round().max(1.0) as u32;
    let margin = (options.margin_fraction * width as f32).round() as u32;

    // Contain fit: the logo keeps its aspect ratio and never gets cropped.
    let resized = decoded.resize(target, target, FilterType::Lanczos3).to_rgba8();

    let side = target + 2 * margin;
    let mut canvas = RgbaImage::from_pixel(side, side, background);
    let x = ((side - resized.width()) / 2) as i64;
    let y = ((side - resized.height()) / 2) as i64;
    imageops::overlay(&mut canvas, &resized, x, y);

    Ok(canvas)
}
