//! The reply sent back to the dialogue platform.

use serde::{Deserialize, Serialize};

/// HTTP-style outcome class of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStatus {
    /// Normal replies, including soft failures such as "no order found".
    Ok,
    /// Malformed or unrecognised input.
    BadRequest,
    /// Backend or unexpected faults.
    InternalError,
}

impl FulfillmentStatus {
    pub fn code(self) -> u16 {
        match self {
            FulfillmentStatus::Ok => 200,
            FulfillmentStatus::BadRequest => 400,
            FulfillmentStatus::InternalError => 500,
        }
    }
}

/// JSON body of a reply: `{"fulfillmentText": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentBody {
    pub fulfillment_text: String,
}

/// A reply: status plus the text the agent will say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    pub status: FulfillmentStatus,
    pub text: String,
}

impl Fulfillment {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            status: FulfillmentStatus::Ok,
            text: text.into(),
        }
    }

    pub fn bad_request(text: impl Into<String>) -> Self {
        Self {
            status: FulfillmentStatus::BadRequest,
            text: text.into(),
        }
    }

    pub fn internal_error(text: impl Into<String>) -> Self {
        Self {
            status: FulfillmentStatus::InternalError,
            text: text.into(),
        }
    }

    pub fn body(&self) -> FulfillmentBody {
        FulfillmentBody {
            fulfillment_text: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_uses_platform_field_name() {
        let reply = Fulfillment::bad_request("Intent not recognized.");
        assert_eq!(reply.status.code(), 400);
        assert_eq!(
            serde_json::to_value(reply.body()).unwrap(),
            serde_json::json!({ "fulfillmentText": "Intent not recognized." })
        );
    }
}
