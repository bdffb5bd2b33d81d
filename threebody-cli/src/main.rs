use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use threebody_core::diagnostics::Conservation;
use threebody_core::{SimConfig, Simulation, Viewport};

mod wallpaper_app;

#[derive(Parser)]
#[command(name = "threebody")]
#[command(about = "Three-body gravitational wallpaper", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate without a window and print the final state
    Run {
        /// JSON configuration file; defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Wall-clock seconds to simulate
        #[arg(long, default_value_t = 10.0)]
        seconds: f64,
        /// Host frame rate driving the simulation
        #[arg(long, default_value_t = 60)]
        fps: u32,
        /// Override the configuration's random seed
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
    /// Open the animated wallpaper in a window
    View {
        /// JSON configuration file, reloaded when it changes
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 800.0)]
        height: f32,
    },
    /// Print the default configuration as JSON
    Config,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            seconds,
            fps,
            seed,
            width,
            height,
        } => run_headless(config.as_deref(), seconds, fps, seed, Viewport::new(width, height)),
        Commands::View {
            config,
            width,
            height,
        } => view(config, width, height),
        Commands::Config => print_default_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Read and validate a configuration file, or fall back to defaults
pub(crate) fn load_config(path: Option<&Path>) -> Result<SimConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            Ok(SimConfig::from_json_str(&source)?)
        }
        None => Ok(SimConfig::default()),
    }
}

fn run_headless(
    config_path: Option<&Path>,
    seconds: f64,
    fps: u32,
    seed: Option<u64>,
    viewport: Viewport,
) -> Result<(), Box<dyn std::error::Error>> {
    if fps == 0 {
        return Err("fps must be at least 1".into());
    }

    let mut config = load_config(config_path)?;
    if seed.is_some() {
        config.seed = seed;
    }
    let (g, eps) = (config.gravity, config.softening);

    let mut sim = Simulation::new(config, viewport)?;
    let baseline = Conservation::measure(sim.bodies(), g, eps);

    let frame = 1.0 / f64::from(fps);
    let frames = (seconds.max(0.0) * f64::from(fps)).round() as u64;
    let mut substeps = 0usize;
    for _ in 0..frames {
        substeps += sim.advance_frame(frame);
    }

    println!(
        "simulated {:.3}s in {} frames ({} substeps)",
        sim.elapsed(),
        frames,
        substeps
    );
    for (i, body) in sim.bodies().iter().enumerate() {
        println!(
            "body{} mass = {} pos = ({:.6}, {:.6}) vel = ({:.6}, {:.6})",
            i, body.mass, body.pos.x, body.pos.y, body.vel.x, body.vel.y
        );
    }
    println!("momentum_drift = {:e}", baseline.momentum_drift(sim.bodies()));
    println!(
        "energy_drift = {:e}",
        baseline.relative_energy_drift(sim.bodies(), g, eps)
    );

    Ok(())
}

fn view(
    config_path: Option<PathBuf>,
    width: f32,
    height: f32,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Three-body wallpaper")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "threebody",
        options,
        Box::new(move |cc| Ok(Box::new(wallpaper_app::WallpaperApp::new(config_path, cc)))),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;

    Ok(())
}

fn print_default_config() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", SimConfig::default().to_json_pretty()?);
    Ok(())
}
