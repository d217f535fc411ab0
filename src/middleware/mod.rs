pub mod admin;
pub mod auth;
pub mod response;

pub use admin::AdminUser;
pub use auth::AuthUser;
pub use response::{ApiResponse, ApiResult};
