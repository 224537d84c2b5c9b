mod collision;
mod config;
mod context;
mod error;
mod frame_clock;
mod games;
mod gui;
mod input_system;
mod launcher;
mod render;
mod session;
mod text;

use config::HubConfig;
use context::HubContext;
use error::{HubError, HubResult};
use launcher::Launcher;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    // RUST_LOG wins; otherwise our own events at info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("game_hub=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Settings from the default location; a broken file is reported and ignored
fn load_config() -> HubConfig {
    let path = HubConfig::default_path();
    match HubConfig::load_from_file(&path) {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "ignoring config file, using defaults");
            HubConfig::default()
        }
    }
}

fn main() -> HubResult<()> {
    init_logging();

    let config = load_config();
    info!(?config, "starting game hub");

    let sdl_context = sdl2::init().map_err(HubError::Sdl)?;
    let mut ctx = HubContext::new(&sdl_context, config)?;

    Launcher::new().run(&mut ctx)?;

    info!("shutting down");
    Ok(())
}
