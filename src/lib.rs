use lambda_runtime::{Error, LambdaEvent};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::events::ScheduledInvocation;
use crate::metrics::MetricPublisher;
use crate::process::{RunReport, ShardCountCollector};
use crate::streams::{StreamEnumerator, StreamInspector};

pub mod capture;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod metrics;
pub mod process;
pub mod streams;

pub use clients::AwsClients;

pub fn set_up_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();
}

// lambda handler
pub async fn function_handler<E, I, P>(
    collector: &ShardCountCollector<E, I, P>,
    evt: LambdaEvent<ScheduledInvocation>,
) -> Result<RunReport, Error>
where
    E: StreamEnumerator,
    I: StreamInspector,
    P: MetricPublisher,
{
    info!(request_id = %evt.context.request_id, "Handling lambda invocation");
    debug!(
        namespace = %collector.config().namespace,
        metric_name = %collector.config().metric_name,
        "collecting shard counts"
    );

    let report = collector.run().await?;
    Ok(report)
}
