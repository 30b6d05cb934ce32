//! User accounts and session authentication.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{list_users, login, logout, me, register};
pub use users::User;
