//! HTTP binding: a single `POST /` route.

use super::Dispatcher;
use crate::model::{Fulfillment, FulfillmentBody};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", post(handle_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

// The body is taken as raw bytes so that malformed JSON gets the webhook's own 400 reply
// instead of axum's rejection.
async fn handle_webhook(State(dispatcher): State<Dispatcher>, body: Bytes) -> Fulfillment {
    dispatcher.handle(&body).await
}

impl IntoResponse for Fulfillment {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: FulfillmentBody = self.body();
        (status, Json(body)).into_response()
    }
}
