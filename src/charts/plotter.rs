//! Chart Plotter Module
//! Draws the dashboard charts interactively using egui_plot.

use crate::charts::palette::{self, Rgb};
use crate::stats::{CountryCount, DashboardTables, GenreCount};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Label for an integer grid mark on a categorical axis.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Horizontal bars of the busiest production countries, shaded by count.
    pub fn draw_country_chart(ui: &mut egui::Ui, counts: &[CountryCount], limit: usize, height: f32) {
        let shown: Vec<&CountryCount> = counts.iter().take(limit).collect();
        let max = shown.first().map(|c| c.count).unwrap_or(0);
        let n = shown.len();

        // Highest count at the top: row 0 of the axis is the last entry.
        let labels: Vec<String> = shown.iter().rev().map(|c| c.country.clone()).collect();
        let bars: Vec<Bar> = shown
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Bar::new((n - 1 - i) as f64, c.count as f64)
                    .name(&c.country)
                    .fill(color32(palette::or_rd_shade(c.count, max)))
                    .width(0.7)
            })
            .collect();

        Plot::new("country_counts")
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Number of Titles")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Titles"));
            });
    }

    /// One line per content type of titles added per year.
    pub fn draw_trend_chart(ui: &mut egui::Ui, tables: &DashboardTables, height: f32) {
        let types = tables.content_types();

        Plot::new("yearly_trend")
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Year Added")
            .y_axis_label("Number of Titles Added")
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract().abs() < 1e-6 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for (i, content_type) in types.iter().enumerate() {
                    let color = color32(palette::type_color(content_type, i));
                    let trend = tables.trend_for(content_type);

                    let line: PlotPoints = trend
                        .iter()
                        .map(|&(year, count)| [year as f64, count as f64])
                        .collect();
                    plot_ui.line(Line::new(line).color(color).width(2.0).name(content_type));

                    let points: PlotPoints = trend
                        .iter()
                        .map(|&(year, count)| [year as f64, count as f64])
                        .collect();
                    plot_ui.points(Points::new(points).radius(3.5).color(color).name(content_type));
                }
            });
    }

    /// Ranked horizontal bar chart of genre counts.
    pub fn draw_genre_chart(
        ui: &mut egui::Ui,
        id: &str,
        genres: &[GenreCount],
        color: Rgb,
        height: f32,
    ) {
        let n = genres.len();
        let labels: Vec<String> = genres.iter().rev().map(|g| g.genre.clone()).collect();
        let fill = color32(color);
        let bars: Vec<Bar> = genres
            .iter()
            .enumerate()
            .map(|(i, g)| {
                Bar::new((n - 1 - i) as f64, g.count as f64)
                    .name(&g.genre)
                    .fill(fill)
                    .width(0.7)
            })
            .collect();

        Plot::new(id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Number of Titles")
            .y_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().color(fill).name("Titles"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_marks() {
        let labels = vec!["Dramas".to_string(), "Comedies".to_string()];
        assert_eq!(category_label(&labels, 0.0), "Dramas");
        assert_eq!(category_label(&labels, 1.0), "Comedies");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
        assert_eq!(category_label(&labels, -1.0), "");
    }
}
