// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use snapcam::Config;
use snapcam::constants::paths;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "snapcam")]
#[command(about = "Minimal camera with viewfinder, shutter, camera switch and gallery")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run in terminal mode (renders camera to terminal, the default)
    Terminal,

    /// List available cameras
    List,

    /// Take a photo
    Photo {
        /// Camera index to use (from 'snapcam list')
        #[arg(short, long, default_value = "0")]
        camera: usize,

        /// Output file path (default: ~/Pictures/snapcam/IMG_TIMESTAMP.jpg)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List stored photos, newest first
    Gallery,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Terminal));
    init_logging(interactive);

    let config = Config::load();

    match cli.command {
        None | Some(Commands::Terminal) => snapcam::terminal::run(config),
        Some(Commands::List) => cli::list_cameras(&config),
        Some(Commands::Photo { camera, output }) => cli::take_photo(&config, camera, output),
        Some(Commands::Gallery) => cli::list_gallery(&config),
    }
}

/// Initialize logging
///
/// Set RUST_LOG to control the level (e.g. RUST_LOG=snapcam=debug). The
/// terminal viewer owns the screen, so it logs to a file in the cache dir.
fn init_logging(to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    if to_file && let Some(file) = open_log_file() {
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if to_file {
        // No writable log location, stay quiet rather than corrupt the screen
        builder.with_writer(std::io::sink).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
}

fn open_log_file() -> Option<File> {
    let dir = dirs::cache_dir()?.join(paths::APP_DIR);
    std::fs::create_dir_all(&dir).ok()?;
    File::create(dir.join(paths::LOG_FILE)).ok()
}
