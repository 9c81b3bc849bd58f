mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sommaire",
    version,
    about = "Extract unified coverage records from insurance illustration PDFs (UV, Assomption)"
)]
struct Cli {
    /// Log per-document progress and rejected table rows to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the summary of one illustration PDF
    Parse {
        /// Path to the PDF file
        input_file: PathBuf,

        /// Insurer: uv or assomption (default: detected from the document)
        #[arg(short, long)]
        source: Option<String>,

        /// Custom JSON layout file(s), replacing the built-in layout of their source
        #[arg(short, long = "layout", value_name = "FILE")]
        layout: Vec<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the unified document to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Extract every PDF in a directory
    Batch {
        /// Directory containing PDF files
        directory: PathBuf,

        /// Also search subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Insurer: uv or assomption (default: detected per document)
        #[arg(short, long)]
        source: Option<String>,

        /// Custom JSON layout file(s), replacing the built-in layout of their source
        #[arg(short, long = "layout", value_name = "FILE")]
        layout: Vec<PathBuf>,

        /// Worker threads (default: available parallelism)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect and validate column layouts
    Layouts {
        #[command(subcommand)]
        action: LayoutsAction,
    },
}

#[derive(Subcommand)]
enum LayoutsAction {
    /// List built-in layouts
    List,
    /// Print a built-in layout as JSON
    Show {
        /// Preset name (e.g., "uv")
        preset: String,
    },
    /// Validate a custom layout file
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            source,
            layout,
            output,
            out,
        } => commands::parse::run(input_file, source.as_deref(), &layout, &output, out),
        Commands::Batch {
            directory,
            recursive,
            source,
            layout,
            jobs,
            output,
        } => commands::batch::run(
            directory,
            recursive,
            source.as_deref(),
            &layout,
            jobs,
            &output,
        ),
        Commands::Layouts { action } => match action {
            LayoutsAction::List => commands::layouts::list(),
            LayoutsAction::Show { preset } => commands::layouts::show(&preset),
            LayoutsAction::Validate { file } => commands::layouts::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
