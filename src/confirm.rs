use chrono::Utc;
use uuid::Uuid;

use crate::models::booking::{BookingRequest, Confirmation, ContactSnapshot};

/// Shapes the response for an already-validated booking. Nothing here is
/// persisted; the id only needs to be unique across calls.
pub fn build_confirmation(booking: &BookingRequest) -> Confirmation {
    Confirmation {
        id: format!("BK-{}", Uuid::new_v4()),
        status: "confirmed".to_string(),
        service_type: booking.service_type,
        pickup_date: booking.pickup_date.clone(),
        pickup_time: booking.pickup_time.clone(),
        pickup: booking.pickup_location.clone(),
        dropoff: booking.dropoff_location.clone(),
        stops: booking.stops.clone(),
        distance: booking.distance.clone(),
        duration: booking.duration.clone(),
        contact: ContactSnapshot {
            phone: booking.phone.clone(),
            first_name: booking.first_name.clone(),
            last_name: booking.last_name.clone(),
            email: booking.email.clone(),
        },
        passengers: booking.passengers,
        created_at: Utc::now(),
    }
}
