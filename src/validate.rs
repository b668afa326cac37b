use chrono::NaiveDate;
use serde::Serialize;

use crate::models::booking::BookingRequest;
use crate::phone::{is_valid_email, is_valid_phone};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Checks a submission against every booking rule and reports the full set of
/// violations, not just the first. `today` is the caller's current calendar
/// date; the pickup-date comparison ignores time of day.
pub fn validate_booking(booking: &BookingRequest, today: NaiveDate) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    if booking.pickup_date.trim().is_empty() {
        violations.push(Violation::new("pickupDate", "Pickup date is required"));
    } else {
        match booking.pickup_date.parse::<NaiveDate>() {
            Ok(date) if date < today => {
                violations.push(Violation::new(
                    "pickupDate",
                    "Pickup date cannot be in the past",
                ));
            }
            Ok(_) => {}
            Err(_) => {
                violations.push(Violation::new("pickupDate", "Pickup date is not a valid date"));
            }
        }
    }

    if booking.pickup_time.trim().is_empty() {
        violations.push(Violation::new("pickupTime", "Pickup time is required"));
    }

    if booking.pickup_location.address.trim().is_empty() {
        violations.push(Violation::new("pickupLocation", "Location is required"));
    }

    if booking.dropoff_location.address.trim().is_empty() {
        violations.push(Violation::new("dropoffLocation", "Location is required"));
    }

    if booking.passengers < 1 {
        violations.push(Violation::new("passengers", "At least 1 passenger required"));
    }

    let phone = booking.phone.trim();
    let has_phone = !phone.is_empty();
    let has_identity = !booking.first_name.trim().is_empty()
        && !booking.last_name.trim().is_empty()
        && !booking.email.trim().is_empty();

    // Either a phone or a full identity must be present.
    if !has_phone && !has_identity {
        violations.push(Violation::new("phone", "Phone number is required"));
    }

    if has_phone && !is_valid_phone(phone) {
        violations.push(Violation::new("phone", "Enter a valid phone number"));
    }

    // A phone the store did not recognize means this is a new customer, so
    // identity fields become required.
    if !booking.phone_recognized {
        if booking.first_name.trim().is_empty() {
            violations.push(Violation::new(
                "firstName",
                "First name is required for new customers",
            ));
        }
        if booking.last_name.trim().is_empty() {
            violations.push(Violation::new(
                "lastName",
                "Last name is required for new customers",
            ));
        }
        let email = booking.email.trim();
        if email.is_empty() {
            violations.push(Violation::new(
                "email",
                "Email is required for new customers",
            ));
        } else if !is_valid_email(email) {
            violations.push(Violation::new("email", "Enter a valid email address"));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
