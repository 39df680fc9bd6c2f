use kds_shard_count::events::ScheduledInvocation;
use kds_shard_count::process::ShardCountCollector;
use kds_shard_count::{clients, config, AwsClients};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    kds_shard_count::set_up_logging();

    info!(
        "Initializing {} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    // missing NAMESPACE or METRIC_NAME stops the process before the runtime starts
    let config = config::Config::load_from_env()?;

    let aws_config = clients::load_aws_config(&config).await;
    let clients = AwsClients::new(&aws_config);
    let collector = ShardCountCollector::new(
        config,
        clients.kinesis.clone(),
        clients.kinesis,
        clients.cloudwatch,
    );

    run(service_fn(|request: LambdaEvent<ScheduledInvocation>| {
        kds_shard_count::function_handler(&collector, request)
    }))
    .await
}
