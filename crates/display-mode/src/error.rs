//! Error types for display-mode operations.
//!
//! Only the configuration variants ever reach the host. Store failures and
//! invalid stored values are recovered inside the controller and surface
//! at most as `tracing` events.

use std::fmt;

/// Error type for display-mode operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    /// The persistent store threw or is not available.
    StoreUnavailable(String),

    /// A stored value is not one of the four display-mode literals.
    InvalidStoredValue(String),

    /// A label template failed to compile or render.
    Template(String),

    /// A configuration document could not be parsed.
    Config(String),
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::StoreUnavailable(msg) => write!(f, "store unavailable: {}", msg),
            ModeError::InvalidStoredValue(value) => {
                write!(f, "invalid stored display mode: '{}'", value)
            }
            ModeError::Template(msg) => write!(f, "label template error: {}", msg),
            ModeError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ModeError {}

impl From<minijinja::Error> for ModeError {
    fn from(err: minijinja::Error) -> Self {
        ModeError::Template(err.to_string())
    }
}

impl From<serde_yaml::Error> for ModeError {
    fn from(err: serde_yaml::Error) -> Self {
        ModeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ModeError {
    fn from(err: serde_json::Error) -> Self {
        ModeError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ModeError {
    fn from(err: std::io::Error) -> Self {
        ModeError::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModeError::InvalidStoredValue("sepia".to_string());
        assert!(err.to_string().contains("invalid stored display mode"));
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ModeError = io_err.into();
        assert!(matches!(err, ModeError::StoreUnavailable(_)));
    }

    #[test]
    fn test_from_minijinja_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err: ModeError = mj_err.into();
        assert!(matches!(err, ModeError::Template(_)));
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();
        let err: ModeError = yaml_err.into();
        assert!(matches!(err, ModeError::Config(_)));
    }
}
