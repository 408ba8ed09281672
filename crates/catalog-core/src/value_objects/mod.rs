//! Value objects shared across layers

mod pagination;

pub use pagination::{Page, PageRequest, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
