/// Soul BGM Driver - headless crossfading music player host
use clap::{Parser, Subcommand};
use soul_bgm_driver::{probe, DriverConfig, Runner, Script};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Extra simulated time after the last step so trailing fades settle
const DEFAULT_TAIL: Duration = Duration::from_secs(5);

#[derive(Parser)]
#[command(name = "soul-bgm-driver")]
#[command(about = "Drive the Soul background music player from a script", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script of host events against the player
    Run {
        /// Configuration file path
        #[arg(short, long, env = "SOUL_BGM_CONFIG")]
        config: Option<PathBuf>,

        /// Script file path (built-in demo when omitted)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Simulated seconds to run (at least until the last step)
        #[arg(long)]
        seconds: Option<f32>,
    },
    /// Check that an audio file can be decoded
    Probe {
        /// Audio file path
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soul_bgm=info,soul_bgm_driver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            script,
            seconds,
        } => {
            run(config, script, seconds)?;
        }
        Commands::Probe { path } => {
            probe_file(&path)?;
        }
    }

    Ok(())
}

fn run(
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    seconds: Option<f32>,
) -> anyhow::Result<()> {
    // Load configuration
    let config = DriverConfig::load(config.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Soul BGM driver");
    tracing::info!("Frame rate: {}", config.driver.frame_rate);
    for (name, path) in &config.tracks {
        tracing::info!("Track {}: {}", name, path.display());
    }

    let script = match script {
        Some(path) => {
            tracing::info!("Script: {}", path.display());
            Script::from_file(&path)?
        }
        None => {
            tracing::info!("Script: built-in demo");
            Script::demo()
        }
    };

    let until = match seconds {
        Some(seconds) => Duration::try_from_secs_f32(seconds)
            .map_err(|e| anyhow::anyhow!("Invalid run length {}: {}", seconds, e))?,
        None => script.end() + DEFAULT_TAIL,
    };

    let mut runner = Runner::new(&config);
    let summary = runner.run(&script, until)?;
    runner.report();

    tracing::info!(
        "Ran {} frames ({:.2}s simulated), {} commands",
        summary.frames,
        summary.elapsed.as_secs_f32(),
        summary.commands
    );

    Ok(())
}

fn probe_file(path: &std::path::Path) -> anyhow::Result<()> {
    let info = probe(path)?;

    println!("File: {}", path.display());
    println!("  Sample rate: {} Hz", info.sample_rate);
    println!("  Channels: {}", info.channels);
    match info.duration {
        Some(duration) => println!("  Duration: {:.2}s", duration.as_secs_f32()),
        None => println!("  Duration: unknown"),
    }

    Ok(())
}
