//! API route declarations

pub mod alert_routes;
pub mod exposition_routes;
pub mod usage_routes;
