use std::fmt;

use async_trait::async_trait;
use aws_sdk_kinesis::types::StreamMode;
use aws_sdk_kinesis::Client as KinesisClient;
use serde::Serialize;
use tracing::{debug, warn};

use crate::capture::ResponseCapture;
use crate::error::{DescribeError, EnumerationError};

/// Name of a Kinesis data stream, unique within an account and region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StreamName(String);

impl StreamName {
    pub fn new(name: impl Into<String>) -> Self {
        StreamName(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for StreamName {
    fn from(name: String) -> Self {
        StreamName(name)
    }
}

impl From<&str> for StreamName {
    fn from(name: &str) -> Self {
        StreamName(name.to_string())
    }
}

impl fmt::Display for StreamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityMode {
    OnDemand,
    Provisioned,
}

impl CapacityMode {
    /// Only an explicit `PROVISIONED` mode counts as provisioned; a missing or unrecognised
    /// mode is treated as on-demand.
    pub fn from_stream_mode(mode: Option<&StreamMode>) -> Self {
        match mode {
            Some(StreamMode::Provisioned) => CapacityMode::Provisioned,
            _ => CapacityMode::OnDemand,
        }
    }
}

/// Whether a described stream should produce a metric data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Publish(u32),
    Provisioned,
    NoShardCount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub stream_name: StreamName,
    pub capacity_mode: CapacityMode,
    pub open_shard_count: Option<u32>,
}

impl StreamSummary {
    pub fn new(
        stream_name: StreamName,
        capacity_mode: CapacityMode,
        open_shard_count: Option<u32>,
    ) -> Self {
        StreamSummary {
            stream_name,
            capacity_mode,
            open_shard_count,
        }
    }

    pub fn eligibility(&self) -> Eligibility {
        match (self.capacity_mode, self.open_shard_count) {
            (CapacityMode::Provisioned, _) => Eligibility::Provisioned,
            (CapacityMode::OnDemand, None) => Eligibility::NoShardCount,
            (CapacityMode::OnDemand, Some(count)) => Eligibility::Publish(count),
        }
    }
}

#[async_trait]
pub trait StreamEnumerator: Send + Sync {
    /// Lists every stream name visible to the caller, in backend order.
    async fn list_stream_names(&self) -> Result<Vec<StreamName>, EnumerationError>;
}

#[async_trait]
pub trait StreamInspector: Send + Sync {
    async fn inspect_stream(&self, stream_name: &StreamName)
        -> Result<StreamSummary, DescribeError>;
}

/// An absent list is a broken response; an empty one just means there are no streams.
pub fn stream_names_from(names: Option<Vec<String>>) -> Result<Vec<StreamName>, EnumerationError> {
    names
        .map(|names| names.into_iter().map(StreamName::from).collect())
        .ok_or(EnumerationError::MissingStreamNames)
}

const STREAM_NAMES: &str = "StreamNames";
const SUMMARY: &str = "StreamDescriptionSummary";
const OPEN_SHARD_COUNT: &str = "OpenShardCount";

#[async_trait]
impl StreamEnumerator for KinesisClient {
    async fn list_stream_names(&self) -> Result<Vec<StreamName>, EnumerationError> {
        let capture = ResponseCapture::default();
        let output = self
            .list_streams()
            .customize()
            .interceptor(capture.clone())
            .send()
            .await
            .map_err(|error| EnumerationError::Backend(aws_sdk_kinesis::Error::from(error).into()))?;

        if output.has_more_streams {
            warn!("ListStreams reported more streams than returned; only the first page is processed");
        }

        // an absent list is deserialized as empty
        let names = capture
            .body()
            .contains(&[STREAM_NAMES])
            .then_some(output.stream_names);
        stream_names_from(names)
    }
}

#[async_trait]
impl StreamInspector for KinesisClient {
    async fn inspect_stream(
        &self,
        stream_name: &StreamName,
    ) -> Result<StreamSummary, DescribeError> {
        if stream_name.is_empty() {
            return Err(DescribeError::EmptyStreamName);
        }

        let capture = ResponseCapture::default();
        let output = self
            .describe_stream_summary()
            .stream_name(stream_name.as_str())
            .customize()
            .interceptor(capture.clone())
            .send()
            .await
            .map_err(|error| DescribeError::Backend(aws_sdk_kinesis::Error::from(error).into()))?;

        let body = capture.body();
        let summary = match output.stream_description_summary {
            Some(summary) if body.contains(&[SUMMARY]) => summary,
            _ => return Err(DescribeError::MissingSummary(stream_name.to_string())),
        };

        let stream_mode = summary.stream_mode_details.map(|details| details.stream_mode);
        let open_shard_count = body
            .contains(&[SUMMARY, OPEN_SHARD_COUNT])
            .then_some(summary.open_shard_count);
        debug!(
            stream = %stream_name,
            ?stream_mode,
            ?open_shard_count,
            "described data stream"
        );

        Ok(StreamSummary::new(
            stream_name.clone(),
            CapacityMode::from_stream_mode(stream_mode.as_ref()),
            open_shard_count.and_then(|count| u32::try_from(count).ok()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_mode_from_stream_mode() {
        assert_eq!(
            CapacityMode::from_stream_mode(Some(&StreamMode::Provisioned)),
            CapacityMode::Provisioned
        );
        assert_eq!(
            CapacityMode::from_stream_mode(Some(&StreamMode::OnDemand)),
            CapacityMode::OnDemand
        );
        assert_eq!(CapacityMode::from_stream_mode(None), CapacityMode::OnDemand);
    }

    #[test]
    fn test_eligibility() {
        let summary = |mode, count| StreamSummary::new(StreamName::from("s"), mode, count);

        assert_eq!(
            summary(CapacityMode::OnDemand, Some(3)).eligibility(),
            Eligibility::Publish(3)
        );
        assert_eq!(
            summary(CapacityMode::OnDemand, Some(0)).eligibility(),
            Eligibility::Publish(0)
        );
        assert_eq!(
            summary(CapacityMode::Provisioned, Some(5)).eligibility(),
            Eligibility::Provisioned
        );
        assert_eq!(
            summary(CapacityMode::Provisioned, None).eligibility(),
            Eligibility::Provisioned
        );
        assert_eq!(
            summary(CapacityMode::OnDemand, None).eligibility(),
            Eligibility::NoShardCount
        );
    }

    #[test]
    fn test_stream_names_from() {
        let names = stream_names_from(Some(vec!["a".to_string(), "b".to_string()])).unwrap();
        assert_eq!(names, vec![StreamName::from("a"), StreamName::from("b")]);

        assert!(stream_names_from(Some(vec![])).unwrap().is_empty());
        assert!(matches!(
            stream_names_from(None),
            Err(EnumerationError::MissingStreamNames)
        ));
    }
}
