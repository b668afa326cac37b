use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::Local;

use crate::confirm::build_confirmation;
use crate::error::AppError;
use crate::models::booking::{BookingRequest, Confirmation};
use crate::state::AppState;
use crate::validate::validate_booking;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/bookings", post(submit_booking))
}

async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<Confirmation>), AppError> {
    let start = Instant::now();

    let today = Local::now().date_naive();
    if let Err(violations) = validate_booking(&payload, today) {
        tracing::info!(count = violations.len(), "booking rejected by validation");
        observe(&state, "rejected", start);
        return Err(AppError::Validation(violations));
    }

    // Only a complete identity creates or refreshes a contact row; a
    // recognized returning customer submits phone only and touches nothing.
    let first_name = payload.first_name.trim();
    let last_name = payload.last_name.trim();
    let email = payload.email.trim();

    if !first_name.is_empty() && !last_name.is_empty() && !email.is_empty() {
        match state
            .store
            .upsert(&payload.phone, first_name, last_name, email)
        {
            Ok(contact) => {
                tracing::info!(contact_id = contact.id, "contact upserted");
            }
            Err(err) => {
                observe(&state, "error", start);
                return Err(err.into());
            }
        }
    }

    let confirmation = build_confirmation(&payload);
    tracing::info!(booking_id = %confirmation.id, "booking confirmed");
    observe(&state, "confirmed", start);

    Ok((StatusCode::CREATED, Json(confirmation)))
}

fn observe(state: &AppState, outcome: &str, start: Instant) {
    state
        .metrics
        .booking_latency_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .bookings_total
        .with_label_values(&[outcome])
        .inc();
}
