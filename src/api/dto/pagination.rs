//! Pagination query parameters.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Query parameters of the `ByPage` listings.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-based)
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: i64,

    /// Number of items per page
    #[serde(rename = "pageSize", alias = "page_size", default = "default_page_size")]
    #[validate(range(min = 1, max = 1000, message = "Page size must be between 1 and 1000"))]
    #[param(rename = "pageSize", minimum = 1, maximum = 1000, example = 20)]
    pub page_size: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}
