//! Catalog Record Module
//! Typed raw/normalized records and the per-field normalization rules.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

/// Placeholder substituted for a missing production country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

pub const MOVIE: &str = "Movie";
pub const TV_SHOW: &str = "TV Show";

/// Date layouts accepted by [`parse_date_added`], tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y", // September 9, 2019
    "%b %d, %Y", // Sep 9, 2019
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%Y/%m/%d",
];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One catalog row as read from the source file. Absent cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub content_type: Option<String>,
    pub date_added: Option<String>,
    pub country: Option<String>,
    pub listed_in: Option<String>,
}

/// A catalog row with cleaned and derived fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub content_type: String,
    pub date_added: Option<NaiveDate>,
    pub year_added: Option<i32>,
    pub country: String,
    pub first_country: String,
    pub listed_in: String,
}

impl NormalizedRecord {
    pub fn from_raw(raw: RawRecord) -> Self {
        let date_added = raw.date_added.as_deref().and_then(parse_date_added);
        let country = fill_country(raw.country);
        let first_country = first_country(&country).to_string();

        Self {
            content_type: raw.content_type.unwrap_or_default(),
            date_added,
            year_added: date_added.map(|d| d.year()),
            country,
            first_country,
            listed_in: raw.listed_in.unwrap_or_default(),
        }
    }

    /// Genre tokens of `listed_in`. Empty tokens are skipped, so an empty
    /// field yields nothing.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.listed_in.split(", ").filter(|g| !g.is_empty())
    }

    pub fn is_type(&self, content_type: &str) -> bool {
        self.content_type == content_type
    }
}

/// Normalized records loaded from one source file.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: PathBuf,
    pub records: Vec<NormalizedRecord>,
}

impl Dataset {
    pub fn new(source: impl AsRef<Path>, raw: Vec<RawRecord>) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            records: raw.into_iter().map(NormalizedRecord::from_raw).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records whose `date_added` could not be parsed.
    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.date_added.is_none()).count()
    }
}

/// Best-effort calendar date parser. Returns `None` for anything it
/// cannot make sense of.
pub fn parse_date_added(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Replace an absent or empty country with [`UNKNOWN_COUNTRY`].
pub fn fill_country(country: Option<String>) -> String {
    match country {
        Some(c) if !c.is_empty() => c,
        _ => UNKNOWN_COUNTRY.to_string(),
    }
}

/// First comma-separated token, trimmed.
pub fn first_country(country: &str) -> &str {
    country.split(',').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(t: &str, date: &str, country: Option<&str>, genres: &str) -> RawRecord {
        RawRecord {
            content_type: Some(t.to_string()),
            date_added: Some(date.to_string()),
            country: country.map(str::to_string),
            listed_in: Some(genres.to_string()),
        }
    }

    #[test]
    fn parses_catalog_date_layouts() {
        let expected = NaiveDate::from_ymd_opt(2019, 9, 9);
        assert_eq!(parse_date_added("September 9, 2019"), expected);
        assert_eq!(parse_date_added(" September 09, 2019 "), expected);
        assert_eq!(parse_date_added("Sep 9, 2019"), expected);
        assert_eq!(parse_date_added("2019-09-09"), expected);
        assert_eq!(parse_date_added("09/09/2019"), expected);
        assert_eq!(parse_date_added("2019-09-09 00:00:00"), expected);
    }

    #[test]
    fn unparseable_dates_are_absent() {
        assert_eq!(parse_date_added(""), None);
        assert_eq!(parse_date_added("   "), None);
        assert_eq!(parse_date_added("sometime in 2019"), None);
        assert_eq!(parse_date_added("February 30, 2020"), None);
    }

    #[test]
    fn normalizes_country_and_year() {
        let rec = NormalizedRecord::from_raw(raw(
            MOVIE,
            "January 1, 2021",
            Some("United States, France"),
            "Dramas",
        ));
        assert_eq!(rec.year_added, Some(2021));
        assert_eq!(rec.country, "United States, France");
        assert_eq!(rec.first_country, "United States");
    }

    #[test]
    fn missing_country_becomes_unknown() {
        let absent = NormalizedRecord::from_raw(raw(TV_SHOW, "", None, ""));
        let empty = NormalizedRecord::from_raw(raw(TV_SHOW, "", Some(""), ""));
        assert_eq!(absent.first_country, UNKNOWN_COUNTRY);
        assert_eq!(empty.first_country, UNKNOWN_COUNTRY);
        assert_eq!(absent.year_added, None);
    }

    #[test]
    fn blank_country_yields_empty_first_country() {
        assert_eq!(first_country("   "), "");
        assert_eq!(first_country(", France"), "");
        assert_eq!(first_country(" India ,Nepal"), "India");
    }

    #[test]
    fn empty_listed_in_has_no_genres() {
        let rec = NormalizedRecord::from_raw(RawRecord::default());
        assert_eq!(rec.genres().count(), 0);
        assert_eq!(rec.content_type, "");

        let rec = NormalizedRecord::from_raw(raw(MOVIE, "", None, "Dramas, Comedies"));
        assert_eq!(rec.genres().collect::<Vec<_>>(), vec!["Dramas", "Comedies"]);
    }

    #[test]
    fn dataset_keeps_undated_rows() {
        let ds = Dataset::new(
            "catalog.csv",
            vec![
                raw(MOVIE, "not a date", Some("France"), "Dramas"),
                raw(MOVIE, "March 3, 2020", Some("France"), "Dramas"),
            ],
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.undated_count(), 1);
    }
}
