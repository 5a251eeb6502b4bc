//! Data module - CSV loading, normalization and caching

mod cache;
mod loader;
mod record;

pub use cache::{DatasetCache, Fingerprint};
pub use loader::{DataLoader, LoaderError, REQUIRED_COLUMNS};
pub use record::{
    fill_country, first_country, parse_date_added, Dataset, NormalizedRecord, RawRecord, MOVIE,
    TV_SHOW, UNKNOWN_COUNTRY,
};
