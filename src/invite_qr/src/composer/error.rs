use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ComposerError {
    LogoNotFound(PathBuf),
    LogoFetch(String),
    Encoding(String),
    InvalidOptions(String),
}

impl fmt::Display for ComposerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ComposerError::LogoNotFound(path) => {
                write!(f, "Logo file not found: {}", path.display())
            }
            ComposerError::LogoFetch(reason) => {
                write!(f, "Failed to fetch remote logo: {}", reason)
            }
            ComposerError::Encoding(reason) => {
                write!(f, "Failed to encode QR symbol: {}", reason)
            }
            ComposerError::InvalidOptions(reason) => {
                write!(f, "Invalid rendering options: {}", reason)
            }
        }
    }
}
