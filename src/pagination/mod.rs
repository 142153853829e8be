//! Pagination contract
//!
//! Normalizes raw `page`/`size`/`sortBy`/`direction` query input into a
//! bounded, validated request, and store pages (0-based) into the response
//! shape exposed to clients (1-based).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const PAGINATION_PAGE_INVALID: &str = "Page must be a non-negative integer higher than 0.";
pub const PAGINATION_SIZE_INVALID: &str = "Size must be a positive integer.";
pub const PAGINATION_DIRECTION_FORMAT_INVALID: &str = "Direction must be ASC or DESC";

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_SIZE: i64 = 10;
const DEFAULT_SORT_BY: &str = "id";

/// Raw pagination query parameters, all optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Validated pagination request. All fields hold concrete values; missing
/// input was replaced by defaults before validation ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationRequest {
    /// 1-based page number
    pub page: i64,
    pub size: i64,
    /// Sort field, passed through to the store without semantic validation
    pub sort_by: String,
    pub direction: SortDirection,
}

impl PaginationRequest {
    /// Apply defaults, then validate in order: page, size, direction.
    /// The first failing rule wins.
    pub fn from_query(query: &PaginationQuery) -> Result<Self> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page <= 0 {
            return Err(AppError::Validation(PAGINATION_PAGE_INVALID.to_string()));
        }

        let size = query.size.unwrap_or(DEFAULT_SIZE);
        if size <= 0 {
            return Err(AppError::Validation(PAGINATION_SIZE_INVALID.to_string()));
        }

        let direction = match query
            .direction
            .as_deref()
            .unwrap_or("DESC")
            .to_uppercase()
            .as_str()
        {
            "ASC" => SortDirection::Asc,
            "DESC" => SortDirection::Desc,
            _ => {
                return Err(AppError::Validation(
                    PAGINATION_DIRECTION_FORMAT_INVALID.to_string(),
                ))
            }
        };

        Ok(Self {
            page,
            size,
            sort_by: query
                .sort_by
                .clone()
                .unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            direction,
        })
    }

    /// 0-based page index used against the store
    pub fn page_index(&self) -> i64 {
        self.page - 1
    }

    /// Row offset for the store query
    pub fn offset(&self) -> i64 {
        self.page_index() * self.size
    }
}

/// One page as returned by the store, with a 0-based page index
#[derive(Debug, Clone)]
pub struct StorePage<T> {
    pub items: Vec<T>,
    pub page_index: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> StorePage<T> {
    pub fn new(items: Vec<T>, request: &PaginationRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            items,
            page_index: request.page_index(),
            page_size: request.size,
            total_elements,
            total_pages,
        }
    }
}

/// Paginated response payload, 1-based page numbering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse<T> {
    pub content: Vec<T>,
    pub total_pages: i64,
    pub total_elements: i64,
    pub page_size: i64,
    pub page_number: i64,
    pub empty: bool,
    pub first: bool,
    pub last: bool,
}

impl<T> PaginationResponse<T> {
    /// Translate the store's 0-based page index to the 1-based index exposed
    /// to clients; everything else passes through.
    pub fn from_store(page: StorePage<T>) -> Self {
        Self {
            empty: page.items.is_empty(),
            first: page.page_index == 0,
            last: page.total_pages == 0 || page.page_index + 1 >= page.total_pages,
            page_number: page.page_index + 1,
            page_size: page.page_size,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            content: page.items,
        }
    }
}
