use anyhow::{Context, Result};
use arcade_snake::game::GameConfig;
use arcade_snake::logging;
use arcade_snake::modes::Session;
use clap::Parser;
use log::{LevelFilter, info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Classic walled-arena Snake for the terminal")]
struct Cli {
    /// JSON file with game settings; missing fields use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical screen width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Logical screen height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Simulation ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "arcade_snake.log")]
    log_file: PathBuf,

    /// Log debug events too
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective settings to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then command line flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.screen_width = width;
        }
        if let Some(height) = self.height {
            config.screen_height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        return Ok(());
    }

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::init(&cli.log_file, level)?;
    info!("Starting with {:?}", config);

    let mut session = Session::new(config, cli.seed)?;
    session.run().await
}
