//! srcdoc — source-code listing generator for copyright registration
//!
//! # Usage
//!
//! ```bash
//! # Generate with an explicit extension list
//! srcdoc generate --name Demo --version V1.0 --author "Acme Ltd" --path ./project --extensions rs,toml
//!
//! # Let the extensions be detected from the project
//! srcdoc generate --name Demo --version V1.0 --author "Acme Ltd" --path ./project
//!
//! # Only print what would be detected
//! srcdoc detect --path ./project
//!
//! # Tighter layout via environment
//! SRCDOC_LINES_PER_PAGE=48 srcdoc generate ...
//! ```

use anyhow::{Context, Result};
use assembler::{
    detect_extensions, AssemblerConfig, ConfigOverrides, DocumentAssembler, DocumentMeta,
    GenerateRequest,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with layout settings (overridden by SRCDOC_* variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Include hidden and .gitignore'd files
    #[arg(long, global = true, default_value_t = false)]
    no_gitignore: bool,

    /// Lines per page of the primary layout
    #[arg(long, global = true)]
    lines_per_page: Option<usize>,

    /// Pages taken from the start of the sources
    #[arg(long, global = true)]
    front_pages: Option<usize>,

    /// Pages taken from the end of the sources
    #[arg(long, global = true)]
    back_pages: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the .docx listing
    Generate(GenerateArgs),
    /// Print the file extensions found under a project
    Detect {
        /// Project root
        #[arg(long)]
        path: PathBuf,

        /// Maximum number of extensions to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Software name (header, output file name)
    #[arg(long)]
    name: String,

    /// Software version (header)
    #[arg(long = "version")]
    software_version: String,

    /// Copyright holder (footer)
    #[arg(long)]
    author: String,

    /// Project root
    #[arg(long)]
    path: PathBuf,

    /// Comma-separated extensions, e.g. "rs,toml"; detected when omitted
    #[arg(long)]
    extensions: Option<String>,

    /// Output file (default: "<name>源代码(共<N>页).docx")
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            lines_per_page: self.lines_per_page,
            front_pages: self.front_pages,
            back_pages: self.back_pages,
            include_ignored: self.no_gitignore,
        }
    }
}

fn load_config(cli: &Cli) -> Result<AssemblerConfig> {
    let mut config = match &cli.config {
        Some(path) => AssemblerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AssemblerConfig::from_env(),
    };
    config.apply_overrides(&cli.overrides());
    config.validate()?;
    Ok(config)
}

fn generate(config: AssemblerConfig, args: &GenerateArgs) -> Result<()> {
    let meta = DocumentMeta::new(&args.name, &args.software_version, &args.author)?;

    let extensions = match &args.extensions {
        Some(list) => list.clone(),
        None => {
            let detected =
                detect_extensions(&args.path, config.detect_limit, config.respect_gitignore);
            info!(extensions = %detected.join(","), "No extensions given, using detected set");
            detected.join(",")
        }
    };

    let mut request = GenerateRequest::new(meta, &args.path, &extensions)?;
    if let Some(output) = &args.output {
        request = request.with_output(output);
    }

    let assembler = DocumentAssembler::new(config)?;
    let report = assembler
        .generate(&request)
        .context("Document generation failed")?;

    for skipped in &report.skipped {
        warn!(path = %skipped.path.display(), reason = %skipped.reason, "Skipped");
    }
    println!("{}", report.output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match &cli.command {
        Command::Generate(args) => generate(config, args),
        Command::Detect { path, limit } => {
            anyhow::ensure!(path.is_dir(), "Invalid project directory: {}", path.display());
            let limit = limit.unwrap_or(config.detect_limit);
            let detected = detect_extensions(path, limit, config.respect_gitignore);
            anyhow::ensure!(
                !detected.is_empty(),
                "No file extensions found under {}",
                path.display()
            );
            println!("{}", detected.join(","));
            Ok(())
        }
    }
}
