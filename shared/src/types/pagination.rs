//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit", alias = "per_page")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination with sanitized values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Create from optional query values
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self::new(
            page.unwrap_or_else(default_page),
            limit.unwrap_or_else(default_limit),
        )
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }

    /// Calculate offset as i64 for SQL queries
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Calculate limit as i64 for SQL queries
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Total number of items
    pub count: u64,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub limit: u32,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether there's a next page
    pub has_next: bool,

    /// Whether there's a previous page
    pub has_prev: bool,

    /// The items of this page
    pub results: Vec<T>,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(results: Vec<T>, pagination: Pagination, count: u64) -> Self {
        let total_pages = Self::calculate_total_pages(count, pagination.limit);
        Self {
            count,
            page: pagination.page,
            limit: pagination.limit,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
            results,
        }
    }

    fn calculate_total_pages(count: u64, limit: u32) -> u32 {
        if count == 0 || limit == 0 {
            return 0;
        }
        count.div_ceil(limit as u64) as u32
    }

    /// Transform the items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            count: self.count,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
