//! Command-line interface for xmlsitemap

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use xmlsitemap::manifest::{IndexManifest, SitemapManifest};
#[cfg(feature = "cli")]
use xmlsitemap::{Format, Site, Siteindex, Sitemap};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xmlsitemap")]
#[command(author, version, about = "XML sitemap generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a sitemap from a JSON manifest of pages and images
    Generate {
        /// Path to the JSON manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Base URI for relative URLs
        #[arg(short, long)]
        base: String,

        /// Output format: xml, txt (deprecated), indexXml (deprecated)
        #[arg(short, long, default_value = "xml")]
        format: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a sitemap index from a JSON manifest of sitemaps
    Index {
        /// Path to the JSON manifest
        #[arg(value_name = "MANIFEST")]
        manifest: PathBuf,

        /// Base URI for relative URLs
        #[arg(short, long)]
        base: String,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            manifest,
            base,
            format,
            pretty,
            output,
        } => cmd_generate(manifest, base, format, pretty, output),
        Commands::Index {
            manifest,
            base,
            pretty,
            output,
        } => cmd_index(manifest, base, pretty, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_generate(
    manifest_path: PathBuf,
    base: String,
    format: String,
    pretty: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let format: Format = format.parse()?;
    let site = Site::parse(&base)?.with_debug(pretty);

    let manifest = SitemapManifest::from_file(&manifest_path)?;
    let mut sitemap = Sitemap::new(site);
    manifest.apply(&mut sitemap)?;

    let document = sitemap.generate(format)?;
    write_output(&document, output)
}

#[cfg(feature = "cli")]
fn cmd_index(
    manifest_path: PathBuf,
    base: String,
    pretty: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let site = Site::parse(&base)?.with_debug(pretty);

    let manifest = IndexManifest::from_file(&manifest_path)?;
    let mut index = Siteindex::new(site);
    manifest.apply(&mut index)?;

    let document = index.generate()?;
    write_output(&document, output)
}

#[cfg(feature = "cli")]
fn write_output(document: &str, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            fs::write(&path, document)?;
            eprintln!("Wrote {} bytes to {}", document.len(), path.display());
        }
        None => println!("{}", document),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    std::process::exit(1);
}
