//! Chart Viewer Widget
//! Central scrollable panel laying out the dashboard sections.

use crate::charts::{palette, ChartPlotter};
use crate::stats::DashboardTables;
use egui::{RichText, ScrollArea};

const CHART_HEIGHT: f32 = 360.0;
const SECTION_SPACING: f32 = 18.0;

/// Displays the aggregate tables of the current dataset.
pub struct ChartViewer {
    pub tables: Option<DashboardTables>,
    pub country_limit: usize,
}

impl ChartViewer {
    pub fn new(country_limit: usize) -> Self {
        Self {
            tables: None,
            country_limit,
        }
    }

    pub fn clear(&mut self) {
        self.tables = None;
    }

    pub fn set_tables(&mut self, tables: DashboardTables) {
        self.tables = Some(tables);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(tables) = &self.tables else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("🎬 Content Catalog Dashboard").size(28.0).strong());
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "1. Global Content Distribution");
                ui.label(RichText::new("Number of Titles by Production Country").size(14.0));
                ChartPlotter::draw_country_chart(
                    ui,
                    &tables.country_counts,
                    self.country_limit,
                    CHART_HEIGHT,
                );
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "2. The Rise of TV Shows vs. Movies");
                ui.label(
                    RichText::new("Number of Movies vs. TV Shows Added Over Time").size(14.0),
                );
                ChartPlotter::draw_trend_chart(ui, tables, CHART_HEIGHT);
                ui.add_space(SECTION_SPACING);

                Self::section_header(ui, "3. What Genres Are Most Popular?");
                ui.columns(2, |columns| {
                    columns[0].label(RichText::new("Top Movie Genres").size(14.0).strong());
                    ChartPlotter::draw_genre_chart(
                        &mut columns[0],
                        "top_movie_genres",
                        &tables.top_movie_genres,
                        palette::MOVIE_COLOR,
                        CHART_HEIGHT,
                    );

                    columns[1].label(RichText::new("Top TV Show Genres").size(14.0).strong());
                    ChartPlotter::draw_genre_chart(
                        &mut columns[1],
                        "top_tv_genres",
                        &tables.top_tv_genres,
                        palette::TV_SHOW_COLOR,
                        CHART_HEIGHT,
                    );
                });
            });
    }

    fn section_header(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(20.0).strong());
        ui.separator();
    }
}
