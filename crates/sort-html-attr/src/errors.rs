#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io(std::io::Error),

    /// The settings text is not valid JSON or has a key of the wrong type.
    Json(serde_json::Error),
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind: &str = self.into();
        match self {
            SettingsError::Io(e) => write!(f, "{kind}: {e}"),
            SettingsError::Json(e) => write!(f, "{kind}: {e}"),
        }
    }
}

impl Into<&str> for &SettingsError {
    fn into(self) -> &'static str {
        match self {
            SettingsError::Io(_) => "unreadable-settings",
            SettingsError::Json(_) => "invalid-settings",
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}
