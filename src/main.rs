mod app;
mod dataset;
mod palette;
mod util;

use std::path::PathBuf;

use clap::Parser;

use app::SimulationConfig;

#[derive(Debug, Parser)]
#[command(author, version, about, allow_negative_numbers = true)]
struct Args {
    #[arg(long, default_value = "data/collaboration-network.json")]
    dataset: PathBuf,
    #[arg(long, default_value_t = 1440.0)]
    width: f32,
    #[arg(long, default_value_t = 920.0)]
    height: f32,
    #[arg(long, default_value_t = -300.0)]
    charge_strength: f32,
    #[arg(long, default_value_t = 0.25)]
    link_strength: f32,
    #[arg(long, default_value_t = 80.0)]
    boundary_margin: f32,
}

impl Args {
    fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            charge_strength: self.charge_strength,
            link_strength: self.link_strength,
            boundary_margin: self.boundary_margin,
            ..SimulationConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.simulation_config();
    log::info!("opening {}", args.dataset.display());

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "coauthor-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CoauthorGraphApp::new(
                cc,
                args.dataset.clone(),
                config,
            )))
        }),
    )
}
