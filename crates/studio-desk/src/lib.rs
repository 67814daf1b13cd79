pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod leads;
pub mod model;
pub mod telemetry;
pub mod views;
