use clap::Parser;
use tracing_subscriber::EnvFilter;

use flavorgraph::app::FlavorGraphApp;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the recommendation service.
    #[arg(long, default_value = "http://localhost:8080")]
    endpoint: String,

    /// Flavor term to chart on startup; may be repeated.
    #[arg(long = "flavor")]
    flavors: Vec<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 850.0]),
        ..Default::default()
    };

    eframe::run_native(
        "flavorgraph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(FlavorGraphApp::new(
                cc,
                args.endpoint.clone(),
                args.flavors.clone(),
            )))
        }),
    )
}
