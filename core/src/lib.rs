// Core library for gated scheduled publishing and content edit validation

pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod scheduler;
pub mod telemetry;
pub mod validation;
