//! Control Panel Widget
//! Left side panel with the data source, actions and load status.

use egui::{Color32, RichText};
use std::path::PathBuf;

/// Action requested from the control panel during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    Reload,
    ExportCharts,
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub row_count: Option<usize>,
    pub status: String,
    pub is_error: bool,
    pub busy: bool,
    pub has_charts: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            row_count: None,
            status: "Ready".to_string(),
            is_error: false,
            busy: false,
            has_charts: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
        self.is_error = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Catalog Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(229, 9, 20)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let path_text = self
                    .csv_path
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "No file selected".to_string());
                ui.label(RichText::new(&path_text).size(12.0).color(
                    if self.csv_path.is_some() {
                        Color32::WHITE
                    } else {
                        Color32::GRAY
                    },
                ));

                if let Some(rows) = self.row_count {
                    ui.label(
                        RichText::new(format!("{} titles", rows))
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                }

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.busy, egui::Button::new("Browse CSV..."))
                        .clicked()
                    {
                        action = ControlPanelAction::BrowseCsv;
                    }
                    let can_reload = !self.busy && self.csv_path.is_some();
                    if ui
                        .add_enabled(can_reload, egui::Button::new("⟳ Reload"))
                        .clicked()
                    {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);

        // ===== Export =====
        ui.label(RichText::new("🖼 Export").size(14.0).strong());
        ui.add_space(5.0);
        if ui
            .add_enabled(
                !self.busy && self.has_charts,
                egui::Button::new("Export charts as PNG..."),
            )
            .clicked()
        {
            action = ControlPanelAction::ExportCharts;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Status =====
        ui.horizontal(|ui| {
            if self.busy {
                ui.spinner();
            }
            let color = if self.is_error {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(12.0).color(color));
        });

        action
    }
}
