//! VitalWatch: personalized risk scoring for disease outbreak alerts.
//!
//! The heart of the crate is [`risk::RiskEngine`], a pure function from a
//! person profile and an outbreak alert to an explainable risk assessment.
//! Everything else (configuration, telemetry, the assessment service, and
//! the HTTP router) is plumbing that feeds inputs to the engine or carries
//! its outputs to storage and notification channels.

pub mod config;
pub mod error;
pub mod risk;
pub mod telemetry;
