pub mod api;
pub mod config;
pub mod confirm;
pub mod error;
pub mod models;
pub mod observability;
pub mod phone;
pub mod state;
pub mod store;
pub mod validate;
