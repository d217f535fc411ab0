// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login; // POST /login - authenticate and get a token
pub mod register; // POST /register - create a new account

pub use login::login_post;
pub use register::{register_post, UserRequest};
