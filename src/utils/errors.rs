use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Content error: {message}")]
    Content { message: String },

    #[error("Screen not found: {screen}")]
    ScreenNotFound { screen: String },

    #[error("Photo not found: {photo_id}")]
    PhotoNotFound { photo_id: String },

    #[error("Interaction error: {message}")]
    Interaction { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CardError {
    pub fn content<S: Into<String>>(message: S) -> Self {
        Self::Content {
            message: message.into(),
        }
    }

    pub fn screen_not_found<S: Into<String>>(screen: S) -> Self {
        Self::ScreenNotFound {
            screen: screen.into(),
        }
    }

    pub fn photo_not_found<S: Into<String>>(photo_id: S) -> Self {
        Self::PhotoNotFound {
            photo_id: photo_id.into(),
        }
    }

    pub fn interaction<S: Into<String>>(message: S) -> Self {
        Self::Interaction {
            message: message.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<dialoguer::Error> for CardError {
    fn from(error: dialoguer::Error) -> Self {
        Self::interaction(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = CardError::content("Missing waypoints");
        assert!(matches!(error, CardError::Content { .. }));
        assert_eq!(error.to_string(), "Content error: Missing waypoints");
    }

    #[test]
    fn test_screen_not_found_error() {
        let error = CardError::screen_not_found("attic");
        assert!(matches!(error, CardError::ScreenNotFound { .. }));
        assert_eq!(error.to_string(), "Screen not found: attic");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error: CardError = io.into();
        assert!(matches!(error, CardError::Io(_)));
    }
}
