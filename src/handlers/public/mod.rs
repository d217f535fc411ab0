// handlers/public/mod.rs - Public handlers (no token required)
//
// Token acquisition and account registration.

pub mod auth;

pub use auth::*;
