pub mod pagination;
pub mod resolver;

pub use pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, clamp_limit, page};
pub use resolver::ContentResolver;
