use std::sync::{Arc, Mutex};

use aws_smithy_runtime_api::box_error::BoxError;
use aws_smithy_runtime_api::client::interceptors::context::AfterDeserializationInterceptorContextRef;
use aws_smithy_runtime_api::client::interceptors::Intercept;
use aws_smithy_runtime_api::client::runtime_components::RuntimeComponents;
use aws_smithy_types::config_bag::ConfigBag;
use serde_json::Value;

/// Keeps the raw body of the last response an operation received.
///
/// The SDK fills absent required members with default values, so whether a member was
/// actually sent can only be read from the body itself.
#[derive(Debug, Clone, Default)]
pub struct ResponseCapture {
    body: Arc<Mutex<Option<Vec<u8>>>>,
}

impl ResponseCapture {
    /// The captured body as JSON. A missing or unparsable body reads as `null`.
    pub fn body(&self) -> ResponseBody {
        let value = self
            .body
            .lock()
            .ok()
            .and_then(|body| {
                body.as_deref()
                    .and_then(|bytes| serde_json::from_slice(bytes).ok())
            })
            .unwrap_or(Value::Null);
        ResponseBody(value)
    }
}

impl Intercept for ResponseCapture {
    fn name(&self) -> &'static str {
        "ResponseCapture"
    }

    fn read_after_deserialization(
        &self,
        context: &AfterDeserializationInterceptorContextRef<'_>,
        _runtime_components: &RuntimeComponents,
        _cfg: &mut ConfigBag,
    ) -> Result<(), BoxError> {
        // the body has been buffered by the time deserialization ran
        if let Some(bytes) = context.response().body().bytes() {
            if let Ok(mut body) = self.body.lock() {
                *body = Some(bytes.to_vec());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBody(Value);

impl ResponseBody {
    /// Whether the member at `path` was sent with a non-null value.
    pub fn contains(&self, path: &[&str]) -> bool {
        let mut value = &self.0;
        for key in path {
            match value.get(*key) {
                Some(next) if !next.is_null() => value = next,
                _ => return false,
            }
        }
        true
    }
}

impl From<Value> for ResponseBody {
    fn from(value: Value) -> Self {
        ResponseBody(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contains() {
        let body = ResponseBody::from(json!({
            "StreamDescriptionSummary": {
                "StreamName": "orders",
                "OpenShardCount": 0,
                "StreamModeDetails": null
            }
        }));

        assert!(body.contains(&["StreamDescriptionSummary"]));
        assert!(body.contains(&["StreamDescriptionSummary", "OpenShardCount"]));
        assert!(!body.contains(&["StreamDescriptionSummary", "StreamModeDetails"]));
        assert!(!body.contains(&["StreamNames"]));
        assert!(!body.contains(&["StreamDescriptionSummary", "OpenShardCount", "Value"]));
    }

    #[test]
    fn test_empty_capture_reads_as_null() {
        let capture = ResponseCapture::default();
        assert_eq!(capture.body(), ResponseBody::from(Value::Null));
        assert!(!capture.body().contains(&["StreamNames"]));
    }
}
