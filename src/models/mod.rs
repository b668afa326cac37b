pub mod booking;
pub mod contact;
