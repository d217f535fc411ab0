pub mod manager;
pub mod models;
pub mod movies;
pub mod page;
pub mod statement;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use movies::{MovieStore, PgMovieStore};
pub use page::{Page, PAGE_SIZE};
pub use statement::{DbRow, SqlParam, Statement};
pub use users::{PgUserStore, UserStore};
