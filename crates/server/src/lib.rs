pub mod api;
pub mod config;
pub mod error;
pub mod platform_factory;
pub mod telemetry;
