use crate::endpoint::Endpoint;
use crate::relay::dto::*;

pub const AI_RELAY_ENDPOINT: Endpoint<RelayRequest, RelayReply> = Endpoint::new("/api/openai");
