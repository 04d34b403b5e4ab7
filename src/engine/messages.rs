//! Texts the agent says back to the customer.

use crate::model::{InProgressOrder, OrderId, RemovalOutcome};

pub const ORDER_NOT_FOUND: &str =
    "I'm having trouble finding your order. Sorry! Can you place a new order please?";

pub const CLARIFY_ITEMS: &str =
    "Sorry I didn't understand. Can you please specify food items and quantities clearly?";

pub const CLARIFY_REMOVAL: &str =
    "Sorry I didn't understand. Can you please tell me clearly which food items to remove?";

pub const BACKEND_ERROR: &str =
    "Sorry, I couldn't process your order due to a backend error. Please place a new order again.";

pub const STATUS_LOOKUP_FAILED: &str = "Error fetching order status.";

pub const INTENT_NOT_RECOGNIZED: &str = "Intent not recognized.";

pub const INVALID_PAYLOAD: &str = "Invalid request payload.";

pub fn order_so_far(order: &InProgressOrder) -> String {
    format!("So far you have: {}. Do you need anything else?", order)
}

pub fn removal(outcome: &RemovalOutcome) -> String {
    let mut clauses = Vec::with_capacity(3);
    if !outcome.removed.is_empty() {
        clauses.push(format!("Removed {} from your order!", outcome.removed.join(",")));
    }
    if !outcome.missing.is_empty() {
        clauses.push(format!(
            "Your current order does not have {}",
            outcome.missing.join(",")
        ));
    }
    if outcome.remaining.is_empty() {
        clauses.push("Your order is empty!".to_string());
    } else {
        clauses.push(format!(
            "Here is what is left in your order: {}",
            outcome.remaining
        ));
    }
    clauses.join(" ")
}

pub fn order_placed(order_id: OrderId, total: f64) -> String {
    format!(
        "Awesome. We have placed your order. Here is your order id # {}. \
         Your order total is {:.2} which you can pay at the time of delivery!",
        order_id, total
    )
}

pub fn order_status(order_id: OrderId, status: &str) -> String {
    format!("The order status for order id: {} is: {}", order_id, status)
}

pub fn no_such_order(order_id: OrderId) -> String {
    format!("No order found with order id: {}", order_id)
}

pub fn internal_error(fault: &dyn std::fmt::Display) -> String {
    format!("Internal Server Error: {}", fault)
}
