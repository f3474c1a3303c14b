// Core algorithm exports
pub mod estimator;
pub mod filters;
pub mod normalizer;
pub mod registry;

pub use estimator::Estimator;
pub use filters::{filter, search, matches_query, SearchResults, DEFAULT_RESULT_LIMIT};
pub use normalizer::{display_name, normalize, normalize_row, parse_leading_int};
pub use registry::{RegistryError, TownRegistry};
