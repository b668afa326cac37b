use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/phone/:number", get(lookup_phone))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactDetails>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

async fn lookup_phone(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> Result<Json<LookupResponse>, AppError> {
    if number.trim().len() < 7 {
        state
            .metrics
            .phone_lookups_total
            .with_label_values(&["invalid"])
            .inc();
        return Err(AppError::BadRequest("Invalid phone number".to_string()));
    }

    match state.store.find_by_phone(&number)? {
        Some(contact) => {
            tracing::info!(contact_id = contact.id, "phone lookup hit");
            state
                .metrics
                .phone_lookups_total
                .with_label_values(&["found"])
                .inc();

            Ok(Json(LookupResponse {
                found: true,
                contact: Some(ContactDetails {
                    first_name: contact.first_name,
                    last_name: contact.last_name,
                    email: contact.email,
                    phone: contact.phone,
                }),
            }))
        }
        None => {
            state
                .metrics
                .phone_lookups_total
                .with_label_values(&["miss"])
                .inc();

            Ok(Json(LookupResponse {
                found: false,
                contact: None,
            }))
        }
    }
}
