//! Common type definitions

pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, Pagination};
pub use response::{ApiResponse, HealthResponse, HealthStatus};
