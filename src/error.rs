use thiserror::Error;

/// Convenient alias for results returned by library modules.
pub type Result<T> = std::result::Result<T, ReadalongError>;

#[derive(Debug, Error)]
pub enum ReadalongError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error while {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("transcript \"{title}\" contains no words; grade level is undefined")]
    EmptyTranscript { title: String },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl ReadalongError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn empty_transcript(title: impl Into<String>) -> Self {
        Self::EmptyTranscript {
            title: title.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
