use std::path::PathBuf;

use clap::{Parser, Subcommand};
use valentine_image_pipeline::{build_assets, AssetLayout, PipelineSettings};

#[derive(Parser, Debug)]
#[command(name = "valentine-cli", version, about = "Build-time tools for the valentine page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the hero portrait and carousel thumbnails as AVIF.
    Thumbs {
        #[arg(long, env = "VALENTINE_ASSETS_DIR", default_value = "assets")]
        assets_dir: PathBuf,
        #[arg(long, env = "VALENTINE_OUT_DIR", default_value = "assets/generated")]
        out_dir: PathBuf,
        #[arg(long, env = "VALENTINE_PIPELINE_CONFIG")]
        config: Option<PathBuf>,
        #[arg(long)]
        speed: Option<u8>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Thumbs {
            assets_dir,
            out_dir,
            config,
            speed,
        } => {
            let mut settings = match config.as_deref() {
                Some(path) => PipelineSettings::load(path)?,
                None => PipelineSettings::default(),
            };
            if let Some(speed) = speed {
                settings.speed = speed;
            }

            let layout = AssetLayout::new(assets_dir, out_dir);
            let report = build_assets(&layout, &settings)?;

            match &report.hero {
                Some(hero) => println!("hero: {}", hero.display()),
                None => println!("hero: skipped"),
            }
            println!(
                "thumbnails: {} in {}",
                report.thumbnails.len(),
                layout.gallery_output_dir().display()
            );
            if !report.warnings.is_empty() {
                tracing::info!(
                    warnings = report.warnings.len(),
                    "asset build finished with skipped inputs"
                );
            }
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("valentine_cli=info,valentine_image_pipeline=info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
