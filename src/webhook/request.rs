//! The webhook request envelope and typed access to its parameters.
//!
//! Only the fields the handlers read are modelled; everything else in the platform's
//! payload is ignored. Missing fields default to empty.

use crate::engine::messages::{CLARIFY_ITEMS, CLARIFY_REMOVAL};
use crate::model::{OrderId, SessionId};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub session: String,
    #[serde(default)]
    pub query_result: QueryResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub intent: IntentRef,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default)]
    pub output_contexts: Vec<OutputContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRef {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputContext {
    #[serde(default)]
    pub name: String,
}

/// Raw intent parameters. Values stay untyped until a handler asks for them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameters {
    #[serde(rename = "food-items", default)]
    pub food_items: Option<Value>,
    #[serde(default)]
    pub number: Option<Value>,
}

impl WebhookRequest {
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.query_result.intent.display_name.as_deref()
    }

    /// The session the request belongs to.
    ///
    /// Taken from `session` when it holds a context path, otherwise from the first output
    /// context that does.
    pub fn session_id(&self) -> Option<SessionId> {
        SessionId::from_session_path(&self.session).or_else(|| {
            self.query_result
                .output_contexts
                .iter()
                .find_map(|context| SessionId::from_session_path(&context.name))
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.query_result.parameters
    }
}

/// A parameter that is present but unusable. `Display` is the text sent to the customer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParameterError {
    #[error("{}", CLARIFY_ITEMS)]
    Unclear(String),

    #[error("{}", CLARIFY_REMOVAL)]
    UnclearRemoval(String),

    #[error("Order ID is missing or invalid.")]
    MissingOrderId,

    #[error("Order ID is not a valid integer.")]
    OrderIdNotInteger(String),

    #[error("Order ID is not a valid format.")]
    OrderIdFormat(String),
}

impl Parameters {
    /// `food-items` as a list of names. Absent means no items.
    pub fn food_items(&self) -> Result<Vec<String>, ParameterError> {
        match &self.food_items {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Value::String(item) => Ok(item.clone()),
                    other => Err(ParameterError::Unclear(format!("food item {}", other))),
                })
                .collect(),
            Some(other) => Err(ParameterError::Unclear(format!("food-items {}", other))),
        }
    }

    /// `food-items` of a remove request. Same shape as [`food_items`](Self::food_items), but
    /// no quantities are involved, so a bad shape asks only about the items.
    pub fn food_items_to_remove(&self) -> Result<Vec<String>, ParameterError> {
        self.food_items().map_err(|e| match e {
            ParameterError::Unclear(detail) => ParameterError::UnclearRemoval(detail),
            other => other,
        })
    }

    /// `number` as a list of quantities. Absent means no quantities.
    pub fn quantities(&self) -> Result<Vec<u32>, ParameterError> {
        match &self.number {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(values)) => values.iter().map(quantity).collect(),
            Some(other) => Err(ParameterError::Unclear(format!("number {}", other))),
        }
    }

    /// `number` as a single order id.
    pub fn order_id(&self) -> Result<OrderId, ParameterError> {
        match &self.number {
            None | Some(Value::Null) => Err(ParameterError::MissingOrderId),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(truncate_to_i64))
                .map(OrderId)
                .ok_or_else(|| ParameterError::OrderIdFormat(n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(OrderId)
                .map_err(|_| ParameterError::OrderIdNotInteger(s.clone())),
            Some(other) => Err(ParameterError::OrderIdFormat(other.to_string())),
        }
    }
}

/// Quantities arrive as JSON numbers, often `2.0`; the fraction is dropped.
fn quantity(value: &Value) -> Result<u32, ParameterError> {
    let unclear = || ParameterError::Unclear(format!("quantity {}", value));
    let Value::Number(n) = value else {
        return Err(unclear());
    };
    if let Some(whole) = n.as_u64() {
        return u32::try_from(whole).map_err(|_| unclear());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= 0.0 && f < 4_294_967_296.0 => Ok(f.trunc() as u32),
        _ => Err(unclear()),
    }
}

fn truncate_to_i64(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    (f.is_finite() && f >= -9_223_372_036_854_775_808.0 && f < 9_223_372_036_854_775_808.0)
        .then(|| f.trunc() as i64)
}
