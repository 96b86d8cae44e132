use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use invite_qr::composer::{CenterContent, LogoOptions, MonogramOptions, RenderOptions};
use invite_qr::constants::{
    DEFAULT_CORNER_RADIUS, DEFAULT_DARK_COLOR, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE_FRACTION,
    DEFAULT_LIGHT_COLOR, DEFAULT_LOGO_BACKGROUND, DEFAULT_LOGO_MARGIN_FRACTION,
    DEFAULT_LOGO_SIZE_FRACTION, DEFAULT_MARGIN_MODULES, DEFAULT_MONOGRAM_BACKGROUND,
    DEFAULT_PADDING_FRACTION, DEFAULT_TEXT_COLOR, DEFAULT_WIDTH,
};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
pub struct Cli {
    /// Optional path to a settings JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the CLI
    Config(ConfigArgs),

    /// Render an invitation QR code for a guest
    Invite(InviteArgs),

    /// Render a guest-upload QR code for an album
    Album(AlbumArgs),

    /// Render a QR code for an arbitrary payload
    Encode(EncodeArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Base URL of the wedding frontend (e.g: "https://wedding.example.com")
    #[arg(long, value_name = "URL")]
    pub frontend_url: String,

    /// Default monogram text used when no center content is requested
    #[arg(long, value_name = "TEXT")]
    pub monogram: Option<String>,
}

#[derive(Args)]
pub struct InviteArgs {
    /// Invitation slug as stored by the backend (e.g: "abc123")
    #[arg(value_name = "SLUG", value_parser = parse_slug)]
    pub slug: String,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub center: CenterArgs,

    /// Path of the PNG file to write
    #[arg(short, long, value_name = "FILE", default_value = "invitation.png")]
    pub output: PathBuf,

    /// Also print the symbol to the terminal
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args)]
pub struct AlbumArgs {
    /// Album slug as stored by the backend (e.g: "ceremony")
    #[arg(value_name = "SLUG", value_parser = parse_slug)]
    pub slug: String,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub center: CenterArgs,

    /// Path of the PNG file to write
    #[arg(short, long, value_name = "FILE", default_value = "album.png")]
    pub output: PathBuf,

    /// Also print the symbol to the terminal
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args)]
pub struct EncodeArgs {
    /// Payload to encode, usually a complete URL
    #[arg(value_name = "PAYLOAD")]
    pub payload: String,

    #[command(flatten)]
    pub render: RenderArgs,

    #[command(flatten)]
    pub center: CenterArgs,

    /// Path of the PNG file to write
    #[arg(short, long, value_name = "FILE", default_value = "qr.png")]
    pub output: PathBuf,

    /// Also print the symbol to the terminal
    #[arg(long)]
    pub preview: bool,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Width of the output image in pixels
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Quiet-zone margin in modules
    #[arg(long, default_value_t = DEFAULT_MARGIN_MODULES)]
    pub margin: u32,

    /// Module color as a hex string
    #[arg(long, value_name = "HEX", default_value = DEFAULT_DARK_COLOR)]
    pub dark: String,

    /// Background color as a hex string
    #[arg(long, value_name = "HEX", default_value = DEFAULT_LIGHT_COLOR)]
    pub light: String,

    /// Error correction level
    #[arg(long, default_value = "m", value_parser = ["l", "m", "q", "h"])]
    pub error_correction: String,
}

impl RenderArgs {
    pub fn to_options(&self) -> Result<RenderOptions> {
        Ok(RenderOptions {
            width: self.width,
            margin: self.margin,
            dark_color: self.dark.clone(),
            light_color: self.light.clone(),
            error_correction: self
                .error_correction
                .parse()
                .map_err(anyhow::Error::msg)?,
        })
    }
}

#[derive(Args)]
pub struct CenterArgs {
    /// Logo image to embed in the center, local path or http(s) URL
    #[arg(long, value_name = "PATH_OR_URL", conflicts_with = "monogram")]
    pub logo: Option<String>,

    /// Monogram text to embed in the center (e.g: "M&E")
    #[arg(long, value_name = "TEXT")]
    pub monogram: Option<String>,

    /// Logo target size as a fraction of the image width
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_LOGO_SIZE_FRACTION)]
    pub logo_size: f32,

    /// Matte margin around the logo as a fraction of the image width
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_LOGO_MARGIN_FRACTION)]
    pub logo_margin: f32,

    /// Matte color behind the logo
    #[arg(long, value_name = "HEX", default_value = DEFAULT_LOGO_BACKGROUND)]
    pub logo_background: String,

    /// Monogram font size as a fraction of the image width
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_FONT_SIZE_FRACTION)]
    pub font_size: f32,

    /// Monogram font family
    #[arg(long, value_name = "NAME", default_value = DEFAULT_FONT_FAMILY)]
    pub font_family: String,

    /// Monogram text color
    #[arg(long, value_name = "HEX", default_value = DEFAULT_TEXT_COLOR)]
    pub text_color: String,

    /// Monogram background color
    #[arg(long, value_name = "HEX", default_value = DEFAULT_MONOGRAM_BACKGROUND)]
    pub monogram_background: String,

    /// Corner radius of the monogram container in pixels
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_CORNER_RADIUS)]
    pub corner_radius: u32,

    /// Padding around the monogram as a fraction of the image width
    #[arg(long, value_name = "FRACTION", default_value_t = DEFAULT_PADDING_FRACTION)]
    pub padding: f32,

    /// Degrade to a bare code when the center content cannot be loaded
    #[arg(long)]
    pub fallback_plain: bool,
}

impl CenterArgs {
    /// Build the center content. When neither --logo nor --monogram is given,
    /// the configured default monogram (if any) is used.
    pub fn to_center_content(&self, default_monogram: Option<&str>) -> CenterContent {
        if let Some(source) = &self.logo {
            CenterContent::Logo(LogoOptions {
                source: source.clone(),
                size_fraction: self.logo_size,
                margin_fraction: self.logo_margin,
                background_color: self.logo_background.clone(),
            })
        } else if let Some(text) = self.monogram.as_deref().or(default_monogram) {
            CenterContent::Monogram(MonogramOptions {
                text: text.to_string(),
                font_size_fraction: self.font_size,
                font_family: self.font_family.clone(),
                text_color: self.text_color.clone(),
                background_color: self.monogram_background.clone(),
                corner_radius: self.corner_radius,
                padding_fraction: self.padding,
            })
        } else {
            CenterContent::None
        }
    }
}

fn parse_slug(s: &str) -> Result<String, String> {
    let t = s.trim();
    if !t.is_empty()
        && t.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(t.to_owned())
    } else {
        Err("Slug must contain only letters, digits, dashes and underscores".into())
    }
}
