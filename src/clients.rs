use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_cloudwatch::Client as CloudWatchClient;
use aws_sdk_kinesis::Client as KinesisClient;

use crate::config::Config;

/// A type used to hold the AWS clients required to interact with AWS services
/// used by the lambda function.
#[derive(Clone)]
pub struct AwsClients {
    pub kinesis: KinesisClient,
    pub cloudwatch: CloudWatchClient,
}

impl AwsClients {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        AwsClients {
            kinesis: KinesisClient::new(sdk_config),
            cloudwatch: CloudWatchClient::new(sdk_config),
        }
    }
}

/// Loads the shared SDK configuration, pinning the region when one was configured.
pub async fn load_aws_config(config: &Config) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::v2023_11_09());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    loader.load().await
}
