use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Question for the AI relay together with the untransformed price payload
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RelayRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Value>,
}

/// Body returned by the relay, either a reply or an error description
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RelayReply {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
