//! Aggregation Module
//! Derives the dashboard's count tables from normalized catalog records.

use crate::data::{NormalizedRecord, MOVIE, TV_SHOW, UNKNOWN_COUNTRY};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Number of genres kept per ranking unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryCount {
    pub country: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyTypeCount {
    pub year: i32,
    #[serde(rename = "type")]
    pub content_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Every table the dashboard draws, computed from one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardTables {
    pub country_counts: Vec<CountryCount>,
    pub yearly_type_counts: Vec<YearlyTypeCount>,
    pub top_genres_overall: Vec<GenreCount>,
    pub top_movie_genres: Vec<GenreCount>,
    pub top_tv_genres: Vec<GenreCount>,
}

impl DashboardTables {
    /// Content types present in the yearly table, in first-seen order.
    pub fn content_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for row in &self.yearly_type_counts {
            if !types.contains(&row.content_type) {
                types.push(row.content_type.clone());
            }
        }
        types
    }

    /// `(year, count)` points of one content type, ordered by year.
    pub fn trend_for(&self, content_type: &str) -> Vec<(i32, usize)> {
        self.yearly_type_counts
            .iter()
            .filter(|row| row.content_type == content_type)
            .map(|row| (row.year, row.count))
            .collect()
    }
}

/// Occurrence counts that remember the order keys were first seen.
#[derive(Debug, Default)]
struct FrequencyTable {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl FrequencyTable {
    fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.counts.len());
                self.counts.push((key.to_string(), 1));
            }
        }
    }

    /// Entries by descending count; equal counts keep first-seen order.
    fn ranked(mut self) -> Vec<(String, usize)> {
        self.counts.sort_by(|a, b| b.1.cmp(&a.1));
        self.counts
    }
}

/// Computes the aggregate tables. All functions are pure.
pub struct Aggregator;

impl Aggregator {
    /// Titles per first production country, excluding the unknown sentinel.
    pub fn country_counts(records: &[NormalizedRecord]) -> Vec<CountryCount> {
        let mut table = FrequencyTable::default();
        for record in records {
            table.add(&record.first_country);
        }

        table
            .ranked()
            .into_iter()
            .filter(|(country, _)| country != UNKNOWN_COUNTRY)
            .map(|(country, count)| CountryCount { country, count })
            .collect()
    }

    /// Titles added per (year, type). Records without a year or without a
    /// type are skipped.
    pub fn yearly_type_counts(records: &[NormalizedRecord]) -> Vec<YearlyTypeCount> {
        let mut groups: BTreeMap<(i32, &str), usize> = BTreeMap::new();
        for record in records {
            if record.content_type.is_empty() {
                continue;
            }
            if let Some(year) = record.year_added {
                *groups.entry((year, record.content_type.as_str())).or_insert(0) += 1;
            }
        }

        groups
            .into_iter()
            .map(|((year, content_type), count)| YearlyTypeCount {
                year,
                content_type: content_type.to_string(),
                count,
            })
            .collect()
    }

    /// The `top_n` most frequent genres, optionally restricted to one
    /// content type. Each title counts once for every genre it lists.
    pub fn top_genres(
        records: &[NormalizedRecord],
        content_type: Option<&str>,
        top_n: usize,
    ) -> Vec<GenreCount> {
        let mut table = FrequencyTable::default();
        records
            .iter()
            .filter(|r| content_type.map_or(true, |t| r.is_type(t)))
            .flat_map(|r| r.genres())
            .for_each(|genre| table.add(genre));

        table
            .ranked()
            .into_iter()
            .take(top_n)
            .map(|(genre, count)| GenreCount { genre, count })
            .collect()
    }

    /// Compute every dashboard table. The tables are independent and are
    /// built concurrently.
    pub fn compute_all(records: &[NormalizedRecord], top_n: usize) -> DashboardTables {
        let ((country_counts, yearly_type_counts), (top_genres_overall, (top_movie_genres, top_tv_genres))) =
            rayon::join(
                || {
                    rayon::join(
                        || Self::country_counts(records),
                        || Self::yearly_type_counts(records),
                    )
                },
                || {
                    rayon::join(
                        || Self::top_genres(records, None, top_n),
                        || {
                            rayon::join(
                                || Self::top_genres(records, Some(MOVIE), top_n),
                                || Self::top_genres(records, Some(TV_SHOW), top_n),
                            )
                        },
                    )
                },
            );

        DashboardTables {
            country_counts,
            yearly_type_counts,
            top_genres_overall,
            top_movie_genres,
            top_tv_genres,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;

    fn record(t: &str, date: &str, country: &str, genres: &str) -> NormalizedRecord {
        NormalizedRecord::from_raw(RawRecord {
            content_type: Some(t.to_string()),
            date_added: Some(date.to_string()),
            country: Some(country.to_string()),
            listed_in: Some(genres.to_string()),
        })
    }

    fn sample() -> Vec<NormalizedRecord> {
        vec![
            record(MOVIE, "September 9, 2019", "United States, France", "Dramas, Comedies"),
            record(TV_SHOW, "", "", "Dramas"),
            record(MOVIE, "January 1, 2021", "France", "Comedies"),
        ]
    }

    fn genre(name: &str, count: usize) -> GenreCount {
        GenreCount {
            genre: name.to_string(),
            count,
        }
    }

    #[test]
    fn sample_catalog_tables() {
        let records = sample();
        let firsts: Vec<&str> = records.iter().map(|r| r.first_country.as_str()).collect();
        assert_eq!(firsts, vec!["United States", UNKNOWN_COUNTRY, "France"]);

        let tables = Aggregator::compute_all(&records, DEFAULT_TOP_N);
        assert_eq!(
            tables.country_counts,
            vec![
                CountryCount {
                    country: "United States".to_string(),
                    count: 1
                },
                CountryCount {
                    country: "France".to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            tables.yearly_type_counts,
            vec![
                YearlyTypeCount {
                    year: 2019,
                    content_type: MOVIE.to_string(),
                    count: 1
                },
                YearlyTypeCount {
                    year: 2021,
                    content_type: MOVIE.to_string(),
                    count: 1
                },
            ]
        );
        assert_eq!(
            tables.top_movie_genres,
            vec![genre("Comedies", 2), genre("Dramas", 1)]
        );
        assert_eq!(tables.top_tv_genres, vec![genre("Dramas", 1)]);
        assert_eq!(
            tables.top_genres_overall,
            vec![genre("Dramas", 2), genre("Comedies", 2)]
        );
    }

    #[test]
    fn unknown_country_is_never_counted() {
        let records = vec![
            record(MOVIE, "", "", "Dramas"),
            record(MOVIE, "", "Unknown", "Dramas"),
            record(MOVIE, "", "India", "Dramas"),
        ];
        let counts = Aggregator::country_counts(&records);
        assert!(counts.iter().all(|c| c.country != UNKNOWN_COUNTRY));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn country_counts_rank_by_count() {
        let records = vec![
            record(MOVIE, "", "Japan", ""),
            record(MOVIE, "", "India", ""),
            record(MOVIE, "", "India, Japan", ""),
        ];
        let counts = Aggregator::country_counts(&records);
        assert_eq!(counts[0].country, "India");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].country, "Japan");
    }

    #[test]
    fn top_genres_truncates_and_keeps_first_seen_ties() {
        let genres: Vec<String> = (0..12).map(|i| format!("Genre {i:02}")).collect();
        let mut records = vec![record(MOVIE, "", "France", &genres.join(", "))];
        records.push(record(MOVIE, "", "France", "Genre 11"));

        let top = Aggregator::top_genres(&records, Some(MOVIE), DEFAULT_TOP_N);
        assert_eq!(top.len(), DEFAULT_TOP_N);
        assert_eq!(top[0], genre("Genre 11", 2));
        let tied: Vec<&str> = top[1..].iter().map(|g| g.genre.as_str()).collect();
        let expected: Vec<&str> = genres[..9].iter().map(String::as_str).collect();
        assert_eq!(tied, expected);
    }

    #[test]
    fn top_genres_respects_type_filter() {
        let records = sample();
        let tv = Aggregator::top_genres(&records, Some(TV_SHOW), DEFAULT_TOP_N);
        assert_eq!(tv, vec![genre("Dramas", 1)]);

        let none = Aggregator::top_genres(&records, Some("Podcast"), DEFAULT_TOP_N);
        assert!(none.is_empty());
    }

    #[test]
    fn empty_listed_in_contributes_nothing() {
        let records = vec![record(MOVIE, "", "France", ""), record(MOVIE, "", "France", "")];
        assert!(Aggregator::top_genres(&records, None, DEFAULT_TOP_N).is_empty());
    }

    #[test]
    fn yearly_counts_skip_untyped_records() {
        let records = vec![
            record(MOVIE, "May 1, 2020", "France", "Dramas"),
            record("", "May 2, 2020", "France", "Dramas"),
        ];
        let yearly = Aggregator::yearly_type_counts(&records);
        assert_eq!(
            yearly,
            vec![YearlyTypeCount {
                year: 2020,
                content_type: MOVIE.to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn yearly_counts_group_by_year_and_type() {
        let records = vec![
            record(TV_SHOW, "March 1, 2020", "France", ""),
            record(MOVIE, "June 1, 2020", "France", ""),
            record(MOVIE, "June 2, 2020", "France", ""),
            record(MOVIE, "garbage", "France", ""),
        ];
        let tables = Aggregator::compute_all(&records, DEFAULT_TOP_N);
        assert_eq!(tables.trend_for(MOVIE), vec![(2020, 2)]);
        assert_eq!(tables.trend_for(TV_SHOW), vec![(2020, 1)]);
        assert_eq!(tables.content_types(), vec![MOVIE, TV_SHOW]);
        let total: usize = tables.yearly_type_counts.iter().map(|r| r.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn compute_all_is_deterministic() {
        let records = sample();
        assert_eq!(
            Aggregator::compute_all(&records, DEFAULT_TOP_N),
            Aggregator::compute_all(&records, DEFAULT_TOP_N)
        );
    }
}
