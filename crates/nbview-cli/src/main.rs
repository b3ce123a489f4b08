//! nbview CLI - render Jupyter notebooks to embeddable HTML.

mod cells;
mod render;
mod source;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::source::SourceArgs;

#[derive(Parser)]
#[command(name = "nbview")]
#[command(about = "Render Jupyter notebooks to embeddable HTML")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a notebook and render it to HTML
    Render {
        #[command(flatten)]
        source: SourceArgs,

        /// Output path for the HTML (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the cells left after range filtering
    Cells {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for rendered output
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render { source, output } => render::execute(&source, output.as_deref())?,
        Commands::Cells { source } => cells::execute(&source)?,
    }

    Ok(())
}
