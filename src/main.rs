mod app;
mod stemma;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Load a stemma dataset from a JSON file instead of the built-in corpus.
    #[arg(long)]
    dataset: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "stemma-viewer",
        options,
        Box::new(move |cc| Ok(Box::new(app::StemmaViewerApp::new(cc, args.dataset.clone())))),
    )
}
