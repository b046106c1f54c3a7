//! # Zlang Core
//!
//! The domain layer of the Zlang dictionary service.
//! This crate contains the business rules (authentication, the auth gateway,
//! voting and the leaderboard) with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
