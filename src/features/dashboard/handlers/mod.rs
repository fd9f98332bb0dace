pub mod dashboard_handler;
pub mod page_handler;

pub use dashboard_handler::*;
