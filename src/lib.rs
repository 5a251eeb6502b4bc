//! Catalog Dashboard - CSV catalog aggregation & interactive charts
//!
//! Loads a video-on-demand title catalog, normalizes dates and countries,
//! and derives the count tables drawn by the dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;

pub use config::{ConfigError, DashboardConfig, ExportConfig};
pub use data::{DataLoader, Dataset, DatasetCache, LoaderError, NormalizedRecord};
pub use stats::{Aggregator, DashboardTables};
