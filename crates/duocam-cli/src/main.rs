use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod capture;
mod config;
mod merge;
mod term;

#[derive(Parser)]
#[command(name = "duocam", about = "Paired thermal + RGB camera capture")]
struct Cli {
    /// Path to a TOML config file (device paths, resolutions, zoom).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive capture loop ('s' saves, 'q' quits)
    Capture {
        /// Thermal camera device path (overrides config)
        #[arg(long)]
        thermal_device: Option<String>,
        /// RGB camera device path (overrides config)
        #[arg(long)]
        rgb_device: Option<String>,
        /// Directory for saved PNG pairs
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
        /// Stop after this many composited frames (for unattended runs)
        #[arg(long)]
        frames: Option<u64>,
    },
    /// Pair *_thermal.png / *_rgb.png files in a directory into *_combined.png
    Merge {
        /// Directory holding the saved PNG pairs
        directory: PathBuf,
        /// Letterbox rows to strip from the top and bottom of each image
        #[arg(short, long, default_value_t = 64)]
        padding: u32,
    },
    /// List V4L2 capture devices
    ListDevices,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Capture {
            thermal_device,
            rgb_device,
            output_dir,
            frames,
        } => {
            if let Some(dev) = thermal_device {
                config.thermal.device = dev;
            }
            if let Some(dev) = rgb_device {
                config.rgb.device = dev;
            }
            capture::run(&config, &output_dir, frames)
        }
        Commands::Merge { directory, padding } => merge::run(&directory, padding),
        Commands::ListDevices => {
            let devices = duocam_hw::Camera::list_devices();
            if devices.is_empty() {
                println!("no V4L2 capture devices found");
            }
            for dev in devices {
                println!("{}\t{} ({}, {})", dev.path, dev.name, dev.driver, dev.bus);
            }
            Ok(())
        }
    }
}
