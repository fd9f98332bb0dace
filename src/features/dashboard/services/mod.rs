mod boundary_service;
mod dashboard_service;
pub mod view_builder;

pub use boundary_service::BoundaryService;
pub use dashboard_service::DashboardService;
