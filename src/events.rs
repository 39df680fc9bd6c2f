use serde::de::{Deserialize, Deserializer, IgnoredAny};

/// Payload of a scheduled invocation. The collector never looks at it, so any JSON value
/// (an EventBridge scheduled event, `{}`, `null`) is accepted and discarded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledInvocation;

impl<'de> Deserialize<'de> for ScheduledInvocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(ScheduledInvocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_scheduled_event() {
        let payload = r#"{
            "version": "0",
            "id": "53dc4d37-cffa-4f76-80c9-8b7d4a4d2eaa",
            "detail-type": "Scheduled Event",
            "source": "aws.events",
            "account": "123456789012",
            "time": "2026-10-16T12:00:00Z",
            "region": "us-east-2",
            "resources": ["arn:aws:events:us-east-2:123456789012:rule/pds-dev-eventBridge-shardCount"],
            "detail": {}
        }"#;
        let evt: ScheduledInvocation = serde_json::from_str(payload).unwrap();
        assert_eq!(evt, ScheduledInvocation);
    }

    #[test]
    fn test_accepts_any_payload() {
        for payload in ["{}", "null", "[]", "\"ping\"", "42"] {
            let evt: Result<ScheduledInvocation, _> = serde_json::from_str(payload);
            assert!(evt.is_ok(), "payload {} was rejected", payload);
        }
    }
}
