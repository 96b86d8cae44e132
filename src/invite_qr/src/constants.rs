pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_MARGIN_MODULES: u32 = 2;
pub const DEFAULT_DARK_COLOR: &str = "#000000";
pub const DEFAULT_LIGHT_COLOR: &str = "#FFFFFF";

pub const DEFAULT_LOGO_SIZE_FRACTION: f32 = 0.20;
pub const DEFAULT_LOGO_MARGIN_FRACTION: f32 = 0.05;
pub const DEFAULT_LOGO_BACKGROUND: &str = "#FFFFFF";

pub const DEFAULT_FONT_SIZE_FRACTION: f32 = 0.15;
pub const DEFAULT_PADDING_FRACTION: f32 = 0.05;
pub const DEFAULT_FONT_FAMILY: &str = "Georgia";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_MONOGRAM_BACKGROUND: &str = "#FFFFFF";
pub const DEFAULT_CORNER_RADIUS: u32 = 12;
