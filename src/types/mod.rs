//! Shared request/response types.

mod response;
mod sort;

pub use response::{ApiResponse, Created, MessageResponse};
pub use sort::{
    Sort, SortColumn, SortOrder, SortQuery, StoreSort, StoreSortColumn, UserSort, UserSortColumn,
};
