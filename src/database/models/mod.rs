pub mod movie;
pub mod user;

pub use movie::{Movie, NewMovie};
pub use user::{NewUser, User};
