//! Catalog Dashboard - CSV catalog aggregation & interactive charts
//!
//! Opens the dashboard window by default; `summary` and `export` run headless.

use anyhow::{Context, Result};
use catalog_dashboard::charts::ChartRenderer;
use catalog_dashboard::gui::DashboardApp;
use catalog_dashboard::{Aggregator, DashboardConfig, DashboardTables, DataLoader};
use clap::{Parser, Subcommand};
use eframe::egui;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "catalog-dashboard")]
#[command(about = "Video-on-demand catalog dashboard")]
#[command(version)]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog CSV, overrides `data_path` from the config
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive dashboard (default)
    Dashboard,
    /// Print the aggregate tables as JSON
    Summary {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Render the charts as PNG files
    Export {
        /// Output directory, overrides `export.output_dir`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_dashboard=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(config),
        Command::Summary { pretty } => {
            let tables = load_tables(&config)?;
            let json = if pretty {
                serde_json::to_string_pretty(&tables)?
            } else {
                serde_json::to_string(&tables)?
            };
            println!("{}", json);
            Ok(())
        }
        Command::Export { out } => {
            if let Some(out) = out {
                config.export.output_dir = out;
            }
            let tables = load_tables(&config)?;
            let files = ChartRenderer::render_all(&tables, config.country_limit, &config.export)
                .context("Failed to export charts")?;
            for file in files {
                println!("{}", file.display());
            }
            Ok(())
        }
    }
}

fn load_tables(config: &DashboardConfig) -> Result<DashboardTables> {
    let dataset = DataLoader::load(&config.data_path).with_context(|| {
        format!("Failed to load catalog {}", config.data_path.display())
    })?;
    Ok(Aggregator::compute_all(&dataset.records, config.top_n))
}

fn run_dashboard(config: DashboardConfig) -> Result<()> {
    info!(data = %config.data_path.display(), "Starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Catalog Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {}", e))
}
