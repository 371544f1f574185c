mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::TracePlotApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Overlay plot of voltage traces against time.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    /// Data file: header line, then a time column followed by one column per trace
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let table = data::loader::load_file(&args.file)?;
    let state = AppState::new(args.file, table);
    let title = state.source_name();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 650.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(TracePlotApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running plot window")
}
