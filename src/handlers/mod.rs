// handlers/mod.rs - handlers grouped by the access a route requires
//
// Public (no token) → Protected (valid token) → Elevated (valid token + admin role)

pub mod elevated;
pub mod protected;
pub mod public;
pub mod utils;
