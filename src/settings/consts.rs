pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "inviteqr";
pub const APP_NAME: &str = "invite-qr";

pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "invite-qr.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
