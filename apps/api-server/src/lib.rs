//! # Zlang API Server
//!
//! HTTP surface of the slang dictionary: auth gateway, handlers and wiring.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
pub mod telemetry;

pub use config::AppConfig;
pub use state::AppState;
