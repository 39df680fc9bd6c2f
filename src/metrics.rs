use async_trait::async_trait;
use aws_sdk_cloudwatch::error::BuildError;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use aws_sdk_cloudwatch::Client as CloudWatchClient;

use crate::config::Config;
use crate::error::PublishError;
use crate::streams::StreamName;

/// Namespace the dashboard and alarm layer reads the shard count from.
pub const DEFAULT_NAMESPACE: &str = "Custom/KinesisMetrics";
pub const DEFAULT_METRIC_NAME: &str = "OpenShardCount";
/// Dimension key carrying the stream name. Part of the published wire contract.
pub const DIMENSION_NAME: &str = "dataStreamName";

/// One shard-count data point, always published with unit `Count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSample {
    pub namespace: String,
    pub metric_name: String,
    pub value: u32,
    pub stream_name: StreamName,
}

impl MetricSample {
    pub fn new(config: &Config, stream_name: StreamName, value: u32) -> Self {
        MetricSample {
            namespace: config.namespace.clone(),
            metric_name: config.metric_name.clone(),
            value,
            stream_name,
        }
    }

    pub fn dimension(&self) -> (&'static str, &str) {
        (DIMENSION_NAME, self.stream_name.as_str())
    }

    pub fn to_datum(&self) -> Result<MetricDatum, BuildError> {
        let (name, value) = self.dimension();
        let dimension = Dimension::builder().name(name).value(value).build();

        Ok(MetricDatum::builder()
            .metric_name(&self.metric_name)
            .value(f64::from(self.value))
            .unit(StandardUnit::Count)
            .dimensions(dimension)
            .build())
    }
}

#[async_trait]
pub trait MetricPublisher: Send + Sync {
    /// Sends one data point. Not idempotent: every call creates a new point.
    async fn publish(&self, sample: &MetricSample) -> Result<(), PublishError>;
}

#[async_trait]
impl MetricPublisher for CloudWatchClient {
    async fn publish(&self, sample: &MetricSample) -> Result<(), PublishError> {
        let datum = sample.to_datum()?;

        self.put_metric_data()
            .namespace(&sample.namespace)
            .metric_data(datum)
            .send()
            .await
            .map_err(|error| {
                PublishError::Backend(aws_sdk_cloudwatch::Error::from(error).into())
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DescribeFailurePolicy;

    fn config() -> Config {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            metric_name: DEFAULT_METRIC_NAME.to_string(),
            region: None,
            describe_failure_policy: DescribeFailurePolicy::Abort,
        }
    }

    #[test]
    fn test_sample_from_config() {
        let sample = MetricSample::new(&config(), StreamName::from("orders"), 4);
        assert_eq!(sample.namespace, "Custom/KinesisMetrics");
        assert_eq!(sample.metric_name, "OpenShardCount");
        assert_eq!(sample.value, 4);
        assert_eq!(sample.dimension(), ("dataStreamName", "orders"));
    }

    #[test]
    fn test_to_datum() {
        let sample = MetricSample::new(&config(), StreamName::from("orders"), 4);
        let datum = sample.to_datum().unwrap();

        assert_eq!(datum.value(), Some(4.0));
        assert_eq!(datum.unit(), Some(&StandardUnit::Count));
        let rendered = format!("{:?}", datum);
        assert!(rendered.contains("OpenShardCount"));
        assert!(rendered.contains("dataStreamName"));
        assert!(rendered.contains("orders"));
    }
}
