// ---------------------------------------------------------------------------
// TowerError: failures while validating parameters or loading presets
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can stop a rebuild or a preset load.
///
/// A rebuild that fails with any of these leaves the currently displayed
/// tower untouched.
#[derive(Debug)]
pub enum TowerError {
    /// A parameter is outside the range the generator can handle.
    InvalidParameters { field: &'static str, reason: String },
    /// I/O error while reading a preset file.
    Io(std::io::Error),
    /// Preset file contents are not valid parameter JSON.
    Parse(String),
}

impl TowerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TowerError::InvalidParameters {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TowerError::InvalidParameters { field, reason } => {
                write!(f, "Invalid parameter `{field}`: {reason}")
            }
            TowerError::Io(e) => write!(f, "I/O error: {e}"),
            TowerError::Parse(msg) => write!(f, "Preset parse error: {msg}"),
        }
    }
}

impl std::error::Error for TowerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TowerError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TowerError {
    fn from(e: std::io::Error) -> Self {
        TowerError::Io(e)
    }
}

impl From<serde_json::Error> for TowerError {
    fn from(e: serde_json::Error) -> Self {
        TowerError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_error_display_invalid() {
        let err = TowerError::invalid("taper", "must be below 1.0");
        let msg = format!("{err}");
        assert!(msg.contains("taper"), "got: {msg}");
        assert!(msg.contains("below 1.0"), "got: {msg}");
    }

    #[test]
    fn test_tower_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TowerError = io_err.into();
        assert!(matches!(err, TowerError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_tower_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: TowerError = json_err.into();
        assert!(matches!(err, TowerError::Parse(_)));
        assert!(format!("{err}").contains("Preset parse error"));
    }
}
