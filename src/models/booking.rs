use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ServiceType {
    #[serde(rename = "one-way")]
    OneWay,
    #[serde(rename = "hourly")]
    Hourly,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Location,
    Airport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Payload for a booking submission. Stops arrive as a plain ordered list of
/// address strings; the client filters out empty-address stops before
/// submitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service_type: ServiceType,
    pub pickup_date: String,
    pub pickup_time: String,
    pub pickup_location_type: LocationType,
    pub pickup_location: Location,
    #[serde(default)]
    pub stops: Vec<String>,
    pub dropoff_location_type: LocationType,
    pub dropoff_location: Location,
    #[serde(default)]
    pub phone: String,
    pub phone_recognized: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub passengers: u32,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSnapshot {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Response object for an accepted booking. Returned to the caller, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub id: String,
    pub status: String,
    pub service_type: ServiceType,
    pub pickup_date: String,
    pub pickup_time: String,
    pub pickup: Location,
    pub dropoff: Location,
    pub stops: Vec<String>,
    pub distance: Option<String>,
    pub duration: Option<String>,
    pub contact: ContactSnapshot,
    pub passengers: u32,
    pub created_at: DateTime<Utc>,
}
