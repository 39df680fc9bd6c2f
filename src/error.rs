use thiserror::Error;

/// Boxed backend failure, kept opaque so the step traits don't leak SDK types.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not defined")]
    MissingVariable(&'static str),
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum EnumerationError {
    #[error("ListStreams response did not contain a stream name list")]
    MissingStreamNames,
    #[error("failed to list data streams: {0}")]
    Backend(#[source] BoxError),
}

#[derive(Error, Debug)]
pub enum DescribeError {
    #[error("stream name must not be empty")]
    EmptyStreamName,
    #[error("DescribeStreamSummary response for {0} did not contain a summary")]
    MissingSummary(String),
    #[error("failed to describe data stream: {0}")]
    Backend(#[source] BoxError),
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to build metric datum: {0}")]
    InvalidDatum(#[from] aws_sdk_cloudwatch::error::BuildError),
    #[error("failed to put metric data: {0}")]
    Backend(#[source] BoxError),
}

/// Failures that abort a whole collection run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),
    #[error("failed to describe stream {stream}: {source}")]
    Describe {
        stream: String,
        #[source]
        source: DescribeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigError::MissingVariable("NAMESPACE");
        assert_eq!(err.to_string(), "NAMESPACE is not defined");

        let err = RunError::Describe {
            stream: "orders".to_string(),
            source: DescribeError::MissingSummary("orders".to_string()),
        };
        assert!(err.to_string().contains("orders"));
        assert!(std::error::Error::source(&err).is_some());

        let err = PublishError::Backend("throttled".into());
        assert_eq!(err.to_string(), "failed to put metric data: throttled");
    }

    #[test]
    fn test_enumeration_error_is_transparent() {
        let err: RunError = EnumerationError::MissingStreamNames.into();
        assert_eq!(
            err.to_string(),
            EnumerationError::MissingStreamNames.to_string()
        );
    }
}
