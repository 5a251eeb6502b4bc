//! Static Chart Renderer
//! Writes the dashboard charts as PNG images using plotters.
//!
//! Output files:
//! 1. `country_counts.png`: top production countries, OrRd shaded bars
//! 2. `yearly_trend.png`: titles added per year, one line per type
//! 3. `top_movie_genres.png` / `top_tv_genres.png`: ranked genre bars

use crate::charts::palette::{self, Rgb};
use crate::config::ExportConfig;
use crate::stats::{DashboardTables, GenreCount};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const COUNTRY_FILE: &str = "country_counts.png";
pub const TREND_FILE: &str = "yearly_trend.png";
pub const MOVIE_GENRES_FILE: &str = "top_movie_genres.png";
pub const TV_GENRES_FILE: &str = "top_tv_genres.png";

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to draw {}: {message}", path.display())]
    Drawing { path: PathBuf, message: String },
}

/// One bar of a ranked chart.
struct RankedBar {
    label: String,
    value: u32,
    color: Rgb,
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn to_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Renders the dashboard charts to PNG files.
pub struct ChartRenderer;

impl ChartRenderer {
    /// Render all four charts into `config.output_dir`. Returns the written paths.
    pub fn render_all(
        tables: &DashboardTables,
        country_limit: usize,
        config: &ExportConfig,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let dir = &config.output_dir;
        std::fs::create_dir_all(dir).map_err(|source| RenderError::OutputDir {
            path: dir.clone(),
            source,
        })?;
        let size = (config.width, config.height);

        let max_country = tables.country_counts.first().map(|c| c.count).unwrap_or(0);
        let countries: Vec<RankedBar> = tables
            .country_counts
            .iter()
            .take(country_limit)
            .map(|c| RankedBar {
                label: c.country.clone(),
                value: to_u32(c.count),
                color: palette::or_rd_shade(c.count, max_country),
            })
            .collect();

        let genre_bars = |genres: &[GenreCount], color: Rgb| -> Vec<RankedBar> {
            genres
                .iter()
                .map(|g| RankedBar {
                    label: g.genre.clone(),
                    value: to_u32(g.count),
                    color,
                })
                .collect()
        };

        let mut written = Vec::with_capacity(4);

        let path = dir.join(COUNTRY_FILE);
        Self::render_ranked_bars(
            &path,
            size,
            "Number of Titles by Production Country",
            &countries,
        )?;
        written.push(path);

        let path = dir.join(TREND_FILE);
        Self::render_trend(&path, size, tables)?;
        written.push(path);

        let path = dir.join(MOVIE_GENRES_FILE);
        Self::render_ranked_bars(
            &path,
            size,
            "Top Movie Genres",
            &genre_bars(&tables.top_movie_genres, palette::MOVIE_COLOR),
        )?;
        written.push(path);

        let path = dir.join(TV_GENRES_FILE);
        Self::render_ranked_bars(
            &path,
            size,
            "Top TV Show Genres",
            &genre_bars(&tables.top_tv_genres, palette::TV_SHOW_COLOR),
        )?;
        written.push(path);

        info!(dir = %dir.display(), charts = written.len(), "Exported charts");
        Ok(written)
    }

    /// Horizontal bar chart, first bar at the top.
    fn render_ranked_bars(
        path: &Path,
        size: (u32, u32),
        title: &str,
        bars: &[RankedBar],
    ) -> Result<(), RenderError> {
        let fail = |e: &dyn std::fmt::Display| RenderError::Drawing {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(&e))?;

        let n = bars.len().max(1);
        let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
        let x_max = max + (max / 10).max(1);
        // Axis row 0 is the bottom; reverse so the largest bar sits on top.
        let labels: Vec<String> = bars.iter().rev().map(|b| b.label.clone()).collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(title, (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(200)
            .build_cartesian_2d(0u32..x_max, (0usize..n).into_segmented())
            .map_err(|e| fail(&e))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n)
            .y_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .x_desc("Number of Titles")
            .label_style((FONT, 14))
            .draw()
            .map_err(|e| fail(&e))?;

        let rows = bars.len();
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let row = rows - 1 - i;
                Rectangle::new(
                    [
                        (0, SegmentValue::Exact(row)),
                        (bar.value, SegmentValue::Exact(row + 1)),
                    ],
                    rgb(bar.color).filled(),
                )
            }))
            .map_err(|e| fail(&e))?;

        root.present().map_err(|e| fail(&e))?;
        Ok(())
    }

    /// Line chart of titles added per year, one series per content type.
    fn render_trend(
        path: &Path,
        size: (u32, u32),
        tables: &DashboardTables,
    ) -> Result<(), RenderError> {
        let fail = |e: &dyn std::fmt::Display| RenderError::Drawing {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| fail(&e))?;

        let rows = &tables.yearly_type_counts;
        let first_year = rows.iter().map(|r| r.year).min().unwrap_or(0);
        let last_year = rows.iter().map(|r| r.year).max().unwrap_or(first_year);
        let max = rows.iter().map(|r| to_u32(r.count)).max().unwrap_or(0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Number of Movies vs. TV Shows Added Over Time", (FONT, 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(first_year..last_year + 1, 0u32..max + max / 10 + 1)
            .map_err(|e| fail(&e))?;

        chart
            .configure_mesh()
            .x_desc("Year Added")
            .y_desc("Number of Titles Added")
            .x_label_formatter(&|y| y.to_string())
            .label_style((FONT, 14))
            .draw()
            .map_err(|e| fail(&e))?;

        for (i, content_type) in tables.content_types().iter().enumerate() {
            let color = rgb(palette::type_color(content_type, i));
            let points: Vec<(i32, u32)> = tables
                .trend_for(content_type)
                .into_iter()
                .map(|(year, count)| (year, to_u32(count)))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))
                .map_err(|e| fail(&e))?
                .label(content_type.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            chart
                .draw_series(points.into_iter().map(|p| Circle::new(p, 4, color.filled())))
                .map_err(|e| fail(&e))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 14))
            .draw()
            .map_err(|e| fail(&e))?;

        root.present().map_err(|e| fail(&e))?;
        Ok(())
    }
}
