use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{Config, DescribeFailurePolicy};
use crate::error::RunError;
use crate::metrics::{MetricPublisher, MetricSample};
use crate::streams::{Eligibility, StreamEnumerator, StreamInspector, StreamName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedPublish {
    pub stream: StreamName,
    pub error: String,
}

/// Outcome of one collection run, returned as the lambda response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub streams_seen: usize,
    pub published: usize,
    pub skipped_provisioned: usize,
    pub skipped_without_shard_count: usize,
    pub skipped_describe_failures: usize,
    pub failed_publishes: Vec<FailedPublish>,
}

/// Lists the account's data streams and publishes the open shard count of every on-demand
/// stream as a custom metric.
pub struct ShardCountCollector<E, I, P> {
    enumerator: E,
    inspector: I,
    publisher: P,
    config: Config,
}

impl<E, I, P> ShardCountCollector<E, I, P>
where
    E: StreamEnumerator,
    I: StreamInspector,
    P: MetricPublisher,
{
    pub fn new(config: Config, enumerator: E, inspector: I, publisher: P) -> Self {
        ShardCountCollector {
            enumerator,
            inspector,
            publisher,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Processes every listed stream in order. Enumeration failures (and describe failures
    /// under the `abort` policy) end the run; publish failures are logged and counted.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let stream_names = self.enumerator.list_stream_names().await?;
        info!(streams = stream_names.len(), "listed data streams");

        let mut report = RunReport::default();
        for stream_name in stream_names {
            report.streams_seen += 1;

            let summary = match self.inspector.inspect_stream(&stream_name).await {
                Ok(summary) => summary,
                Err(source) => match self.config.describe_failure_policy {
                    DescribeFailurePolicy::Abort => {
                        return Err(RunError::Describe {
                            stream: stream_name.to_string(),
                            source,
                        });
                    }
                    DescribeFailurePolicy::Skip => {
                        warn!(stream = %stream_name, error = %source, "skipping stream that could not be described");
                        report.skipped_describe_failures += 1;
                        continue;
                    }
                },
            };

            let shard_count = match summary.eligibility() {
                Eligibility::Publish(count) => count,
                Eligibility::Provisioned => {
                    debug!(stream = %stream_name, "skipping provisioned stream");
                    report.skipped_provisioned += 1;
                    continue;
                }
                Eligibility::NoShardCount => {
                    debug!(stream = %stream_name, "skipping stream without open shard count");
                    report.skipped_without_shard_count += 1;
                    continue;
                }
            };

            let sample = MetricSample::new(&self.config, stream_name, shard_count);
            match self.publisher.publish(&sample).await {
                Ok(()) => {
                    info!(
                        stream = %sample.stream_name,
                        shard_count,
                        "successfully sent custom metric to CloudWatch"
                    );
                    report.published += 1;
                }
                Err(e) => {
                    error!(
                        stream = %sample.stream_name,
                        error = %e,
                        "failed to send custom metric to CloudWatch"
                    );
                    report.failed_publishes.push(FailedPublish {
                        stream: sample.stream_name,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            streams = report.streams_seen,
            published = report.published,
            failed = report.failed_publishes.len(),
            "shard count collection finished"
        );
        Ok(report)
    }
}
