pub mod gauge_registry;
