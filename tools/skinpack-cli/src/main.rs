//! Skinpack CLI: build and inspect Minecraft Bedrock skin packs.
//!
//! Usage:
//!   skinpack build --skin <PNG>[:slim] ...   Build a .mcpack from skin images
//!   skinpack check <PATH>                    Validate a skin image or geometry file
//!   skinpack info <PATH>                     Show the contents of a .mcpack
//!   skinpack config [--init]                 Show or write the configuration file

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use skinpack_common::config::AppConfig;
use skinpack_common::error::SkinpackError;

mod commands;

#[derive(Parser)]
#[command(
    name = "skinpack",
    about = "Bundle Minecraft skins into an importable .mcpack",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a skin pack archive
    Build {
        /// Skin image (PNG), optionally suffixed with `:slim` or `:classic`
        #[arg(short, long = "skin", required = true)]
        skins: Vec<String>,

        /// Display name for each skin, in the order given
        #[arg(long = "skin-name")]
        skin_names: Vec<String>,

        /// Custom geometry file applied to every skin
        #[arg(short, long)]
        geometry: Option<PathBuf>,

        /// Require custom geometry
        #[arg(long)]
        custom: bool,

        /// Pack name
        #[arg(short, long)]
        name: Option<String>,

        /// Pack description
        #[arg(short, long)]
        description: Option<String>,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a skin image or a geometry file
    Check {
        /// Path to a .png or .json file
        path: PathBuf,
    },

    /// Show the contents of a built pack
    Info {
        /// Path to the .mcpack file
        path: PathBuf,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    skinpack_common::logging::init_logging(&logging);

    let result = match cli.command {
        Commands::Build {
            skins,
            skin_names,
            geometry,
            custom,
            name,
            description,
            output,
        } => {
            commands::build::run(
                commands::build::BuildOptions {
                    skins,
                    skin_names,
                    geometry,
                    custom,
                    name,
                    description,
                    output,
                },
                &config,
            )
            .await
        }
        Commands::Check { path } => commands::check::run(path).await,
        Commands::Info { path } => commands::info::run(path).await,
        Commands::Config { init } => commands::config::run(&config, init),
    };

    if let Err(e) = &result {
        let environment = e
            .downcast_ref::<SkinpackError>()
            .is_some_and(SkinpackError::is_environment_failure);
        if environment {
            tracing::error!(error = %e, "Environment failure");
            eprintln!("The input was fine; check disk space and permissions, then retry.");
        }
    }
    result
}
