use crate::{FetchError, MetadataSource};
use serde_json::Value;

/// Serves a fixed payload, or a fixed raw body that is parsed on every fetch.
#[derive(Debug, Clone)]
pub enum StaticSource {
    Payload(Value),
    RawBody(String),
}

impl StaticSource {
    pub fn payload(value: Value) -> Self {
        StaticSource::Payload(value)
    }

    pub fn raw_body(body: impl Into<String>) -> Self {
        StaticSource::RawBody(body.into())
    }
}

#[async_trait::async_trait]
impl MetadataSource for StaticSource {
    async fn fetch(&self) -> Result<Value, FetchError> {
        match self {
            StaticSource::Payload(v) => Ok(v.clone()),
            StaticSource::RawBody(body) => {
                serde_json::from_str(body).map_err(|e| FetchError::decode(&e, body))
            }
        }
    }

    fn describe(&self) -> String {
        "static payload".to_string()
    }
}
