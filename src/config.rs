use std::env;
use std::fmt;
use std::str::FromStr;
use std::string::String;

use crate::error::ConfigError;

/// What to do when a single stream can't be described.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum DescribeFailurePolicy {
    /// Fail the whole run.
    #[default]
    Abort,
    /// Log the failure and move on to the next stream.
    Skip,
}

impl FromStr for DescribeFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(DescribeFailurePolicy::Abort),
            "skip" => Ok(DescribeFailurePolicy::Skip),
            other => Err(format!("unsupported describe failure policy {}", other)),
        }
    }
}

impl fmt::Display for DescribeFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DescribeFailurePolicy::Abort => write!(f, "abort"),
            DescribeFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub namespace: String,
    pub metric_name: String,
    pub region: Option<String>,
    pub describe_failure_policy: DescribeFailurePolicy,
}

impl Config {
    /// Reads the run configuration from the process environment.
    ///
    /// `NAMESPACE` and `METRIC_NAME` are required and must be non-empty. The region comes from
    /// `AWS_DEFAULT_REGION`, then `AWS_REGION`; when neither is set the SDK provider chain
    /// decides.
    pub fn load_from_env() -> Result<Config, ConfigError> {
        let conf = Config {
            namespace: required_var("NAMESPACE")?,
            metric_name: required_var("METRIC_NAME")?,
            region: env::var("AWS_DEFAULT_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|region| !region.trim().is_empty()),
            describe_failure_policy: match env::var("DESCRIBE_FAILURE_POLICY") {
                Ok(value) => {
                    value
                        .parse()
                        .map_err(|reason| ConfigError::InvalidValue {
                            name: "DESCRIBE_FAILURE_POLICY",
                            value,
                            reason,
                        })?
                }
                Err(_) => DescribeFailurePolicy::default(),
            },
        };

        Ok(conf)
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVariable(name))
}
