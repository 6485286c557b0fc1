use thiserror::Error;

/// Main error type for query building and execution
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operator: {kind}")]
    UnsupportedOperator { kind: String },

    #[error("Call to undefined search scope: {name}()")]
    UnknownOperation { name: String },

    #[error("Invalid clause: {0}")]
    InvalidClause(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Record store error: {0}")]
    RecordStore(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for builder operations
pub type Result<T> = std::result::Result<T, BuilderError>;

impl BuilderError {
    /// Whether the error comes from how the query was put together, as opposed
    /// to a failure reported by a collaborator
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            BuilderError::InvalidArgument(_)
                | BuilderError::UnsupportedOperator { .. }
                | BuilderError::UnknownOperation { .. }
                | BuilderError::InvalidClause(_)
        )
    }

    pub(crate) fn missing_value() -> Self {
        BuilderError::InvalidArgument("Value must be provided.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuilderError::UnsupportedOperator {
            kind: "geo_shape".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported operator: geo_shape");

        let err = BuilderError::UnknownOperation {
            name: "popular".to_string(),
        };
        assert_eq!(err.to_string(), "Call to undefined search scope: popular()");

        assert_eq!(
            BuilderError::missing_value().to_string(),
            "Invalid argument: Value must be provided."
        );
    }

    #[test]
    fn test_caller_errors() {
        assert!(BuilderError::missing_value().is_caller_error());
        assert!(BuilderError::InvalidClause("x".to_string()).is_caller_error());
        assert!(!BuilderError::Transport("down".to_string()).is_caller_error());
        assert!(!BuilderError::RecordStore("gone".to_string()).is_caller_error());
    }
}
