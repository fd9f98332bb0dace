pub mod auth_handler;
pub mod login_page_handler;

pub use auth_handler::*;
