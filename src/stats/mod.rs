//! Stats module - Aggregate tables for the dashboard

mod aggregator;

pub use aggregator::{
    Aggregator, CountryCount, DashboardTables, GenreCount, YearlyTypeCount, DEFAULT_TOP_N,
};
