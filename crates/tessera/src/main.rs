//! Tessera CLI - configure content blocks and export them as HTML and CSS.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::generate::{OutputFormat, Viewport};

#[derive(Parser)]
#[command(name = "tessera")]
#[command(about = "Visual block configurator that exports page-builder ready HTML and CSS")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to tessera.toml config file
    #[arg(short, long, default_value = "tessera.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a block project in the current directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Compile one block document and print the result
    Generate {
        /// Block document (.yaml, .yml or .json)
        file: PathBuf,

        /// What to print
        #[arg(short, long, value_enum, default_value = "bundle")]
        format: OutputFormat,

        /// Minify the generated code
        #[arg(short, long)]
        minify: bool,

        /// Viewport for `--format preview`
        #[arg(long, value_enum, default_value = "desktop")]
        viewport: Viewport,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every block document into a static gallery
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Start the live configurator for a block document
    Dev {
        /// Block document to edit (defaults to the first one in the blocks dir)
        file: Option<PathBuf>,

        /// Port to listen on (defaults to config or 7777)
        #[arg(short, long)]
        port: Option<u16>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Compile a block document and save it to the block store
    Save {
        /// Block document to save
        file: PathBuf,

        /// Name to save under (defaults to the document's name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Preview an exported gallery
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&std::env::current_dir()?, yes).await?;
        }
        Commands::Generate {
            file,
            format,
            minify,
            viewport,
            output,
        } => {
            commands::generate::run(file, format, minify, viewport, output).await?;
        }
        Commands::Build { output, no_minify } => {
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&cli.config, output, minify).await?;
        }
        Commands::Dev {
            file,
            port,
            no_open,
        } => {
            commands::dev::run(&cli.config, file, port, !no_open).await?;
        }
        Commands::Save { file, name } => {
            commands::save::run(&cli.config, &file, name).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            let host = config::load_config(&cli.config)?.server.host;
            commands::serve::run(&host, port, dir, !no_open).await?;
        }
    }

    Ok(())
}
