//! HTTP handlers for registration, login, logout, and user listings.

pub mod list;
pub mod login;
pub mod logout;
pub mod me;
pub mod register;
pub mod types;

pub use list::list_users;
pub use login::login;
pub use logout::logout;
pub use me::me;
pub use register::register;
