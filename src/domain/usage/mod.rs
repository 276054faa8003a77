pub mod aggregate;
pub mod service;
pub mod window;
