// handlers/protected/mod.rs - Protected handlers (valid token required)
//
// Every handler here takes an `AuthUser`, so a missing or invalid token is
// answered with 401 before the handler body runs.

pub mod movies; // GET /movies
pub mod users; // GET /users

pub use movies::movies_get;
pub use users::users_get;
