pub mod alert;
pub mod usage;
