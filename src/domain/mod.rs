//! Domain services.

pub mod alert;
pub mod usage;
