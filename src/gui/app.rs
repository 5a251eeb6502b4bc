//! Catalog Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::ChartRenderer;
use crate::config::{DashboardConfig, ExportConfig};
use crate::data::DatasetCache;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::{Aggregator, DashboardTables};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tracing::{error, info};

/// Catalog loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        tables: DashboardTables,
        row_count: usize,
    },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    cache: Arc<Mutex<DatasetCache>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut app = Self::with_config(config);
        let initial = app.config.data_path.clone();
        app.start_load(initial);
        app
    }

    fn with_config(config: DashboardConfig) -> Self {
        Self {
            chart_viewer: ChartViewer::new(config.country_limit),
            config,
            cache: Arc::new(Mutex::new(DatasetCache::new())),
            control_panel: ControlPanel::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.open_csv(path);
        }
    }

    /// Replace the current dataset with `path`. Ignored while a load is running.
    fn open_csv(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }
        self.chart_viewer.clear();
        self.start_load(path);
    }

    fn handle_reload(&mut self) {
        if let Some(path) = self.control_panel.csv_path.clone() {
            self.start_load(path);
        }
    }

    /// Load and aggregate `path` on a background thread.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.busy = true;
        self.control_panel.set_status("Loading catalog...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let cache = Arc::clone(&self.cache);
        let top_n = self.config.top_n;
        thread::spawn(move || Self::run_load(tx, cache, path, top_n));
    }

    /// Run load + aggregation (called from background thread)
    fn run_load(
        tx: Sender<LoadResult>,
        cache: Arc<Mutex<DatasetCache>>,
        path: PathBuf,
        top_n: usize,
    ) {
        let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

        let loaded = match cache.lock() {
            Ok(mut cache) => cache.get_or_load(&path).map_err(|e| e.to_string()),
            Err(_) => Err("dataset cache is poisoned".to_string()),
        };

        let dataset = match loaded {
            Ok(ds) => ds,
            Err(e) => {
                error!(path = %path.display(), "Catalog load failed: {}", e);
                let _ = tx.send(LoadResult::Error(e));
                return;
            }
        };

        let _ = tx.send(LoadResult::Progress("Aggregating...".to_string()));
        let tables = Aggregator::compute_all(&dataset.records, top_n);
        let _ = tx.send(LoadResult::Complete {
            tables,
            row_count: dataset.len(),
        });
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_status(&status);
                    }
                    LoadResult::Complete { tables, row_count } => {
                        self.chart_viewer.set_tables(tables);
                        self.control_panel.row_count = Some(row_count);
                        self.control_panel.has_charts = true;
                        self.control_panel
                            .set_status(&format!("Loaded {} titles", row_count));
                        self.finish_load();
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.chart_viewer.clear();
                        self.control_panel.row_count = None;
                        self.control_panel.has_charts = false;
                        self.control_panel.set_error(&error);
                        self.finish_load();
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_load(&mut self) {
        self.is_loading = false;
        self.control_panel.busy = false;
    }

    /// Render the current charts to PNG files in a chosen folder.
    fn handle_export_charts(&mut self) {
        let Some(tables) = &self.chart_viewer.tables else {
            self.control_panel.set_status("No charts to export");
            return;
        };

        let Some(output_dir) = rfd::FileDialog::new()
            .set_directory(&self.config.export.output_dir)
            .pick_folder()
        else {
            return;
        };

        let export = ExportConfig {
            output_dir,
            ..self.config.export.clone()
        };
        match ChartRenderer::render_all(tables, self.config.country_limit, &export) {
            Ok(files) => {
                info!(count = files.len(), "Charts exported from dashboard");
                self.control_panel.set_status(&format!(
                    "Exported {} charts to {}",
                    files.len(),
                    export.output_dir.display()
                ));
            }
            Err(e) => self.control_panel.set_error(&e.to_string()),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui);

                match action {
                    ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                    ControlPanelAction::Reload => self.handle_reload(),
                    ControlPanelAction::ExportCharts => self.handle_export_charts(),
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
