// handlers/elevated/mod.rs - Elevated handlers (valid token + admin role)
//
// Every handler here takes an `AdminUser` as its first parameter. The token
// is checked (401) before the role (403), and both before the request body
// or path are looked at.

pub mod movies; // POST /movies, PUT|DELETE /movies/:id
pub mod users; // PUT|DELETE /users/:id

pub use movies::{movie_delete, movie_post, movie_put};
pub use users::{user_delete, user_put};
