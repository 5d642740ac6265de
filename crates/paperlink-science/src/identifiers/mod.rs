pub mod canonical;

pub use canonical::{matching_pattern, url_to_id, URL_PATTERNS};
