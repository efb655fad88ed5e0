//! Sort parameters for list endpoints.
//!
//! Query strings are parsed into closed enums before any SQL is built, so only
//! the identifiers listed here can ever reach an `ORDER BY`.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::MSG_INVALID_SORT;
use crate::errors::{AppError, AppResult};

/// Raw `?sortBy=&order=` query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Column to sort by
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`
    pub order: Option<String>,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A column that a listing may be ordered by.
pub trait SortColumn: Sized + Copy {
    /// Column used when `sortBy` is absent
    const DEFAULT: Self;
    /// Direction used when `order` is absent
    const DEFAULT_ORDER: SortOrder;

    /// Map a query-string value onto the allow-list.
    fn parse(value: &str) -> Option<Self>;
}

/// Validated sort request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<C> {
    pub column: C,
    pub order: SortOrder,
}

impl<C: SortColumn> Default for Sort<C> {
    fn default() -> Self {
        Self {
            column: C::DEFAULT,
            order: C::DEFAULT_ORDER,
        }
    }
}

impl SortQuery {
    /// Validate against the allow-list of `C`.
    ///
    /// # Errors
    /// Returns a validation error for any unlisted column or direction.
    pub fn parse<C: SortColumn>(&self) -> AppResult<Sort<C>> {
        let column = match self.sort_by.as_deref() {
            None => C::DEFAULT,
            Some(value) => C::parse(value).ok_or_else(invalid_sort)?,
        };
        let order = match self.order.as_deref() {
            None => C::DEFAULT_ORDER,
            Some(value) => SortOrder::parse(value).ok_or_else(invalid_sort)?,
        };

        Ok(Sort { column, order })
    }
}

fn invalid_sort() -> AppError {
    AppError::validation(MSG_INVALID_SORT)
}

/// Store listing columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSortColumn {
    Name,
    CreatedAt,
    AverageRating,
    RatingCount,
}

impl SortColumn for StoreSortColumn {
    const DEFAULT: Self = StoreSortColumn::CreatedAt;
    const DEFAULT_ORDER: SortOrder = SortOrder::Desc;

    fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(StoreSortColumn::Name),
            "created_at" => Some(StoreSortColumn::CreatedAt),
            "averageRating" => Some(StoreSortColumn::AverageRating),
            "ratingCount" => Some(StoreSortColumn::RatingCount),
            _ => None,
        }
    }
}

impl StoreSortColumn {
    /// SQL expression in the store aggregate query
    pub fn as_sql(&self) -> &'static str {
        match self {
            StoreSortColumn::Name => "s.name",
            StoreSortColumn::CreatedAt => "s.created_at",
            StoreSortColumn::AverageRating => "average_rating",
            StoreSortColumn::RatingCount => "rating_count",
        }
    }
}

/// Admin user listing columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortColumn {
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

impl SortColumn for UserSortColumn {
    const DEFAULT: Self = UserSortColumn::Id;
    const DEFAULT_ORDER: SortOrder = SortOrder::Asc;

    fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(UserSortColumn::Id),
            "name" => Some(UserSortColumn::Name),
            "email" => Some(UserSortColumn::Email),
            "role" => Some(UserSortColumn::Role),
            "created_at" => Some(UserSortColumn::CreatedAt),
            _ => None,
        }
    }
}

pub type StoreSort = Sort<StoreSortColumn>;
pub type UserSort = Sort<UserSortColumn>;
