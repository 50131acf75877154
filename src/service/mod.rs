//! Service layer: business logic orchestration.
//!
//! [`WardService`] coordinates reads and writes against the store and
//! publishes recorded readings through the channel bus.

pub mod ward_service;

pub use ward_service::WardService;
