//! Application services - orchestrate ports to implement the use cases.

mod auth;
mod gateway;
mod slangs;

pub use auth::{AuthService, IssuedToken};
pub use gateway::{Access, AuthGateway, DEFAULT_PUBLIC_PATHS, bearer_token};
pub use slangs::SlangService;
