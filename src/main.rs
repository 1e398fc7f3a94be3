// ABOUTME: Main entry point for the soapbox program.
// ABOUTME: Provides CLI interface and executes compile passes from the library.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a presentation directory into an HTML fragment
    Compile(CompileArgs),
}

#[derive(Args)]
struct CompileArgs {
    /// Presentation root directory
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Write the fragment here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include toc-tagged slides and build the table of contents
    #[arg(long)]
    toc: bool,

    /// Print rendering: drop noprint slides instead of printonly ones
    #[arg(long)]
    print: bool,

    /// Keep only supplemental slides carrying this tag
    #[arg(long)]
    supplemental: Option<String>,

    /// Static export: rewrite image paths to ./file/... instead of the asset route
    #[arg(long = "static")]
    static_render: bool,

    /// Prefix for dynamically served assets
    #[arg(long, default_value = "/")]
    asset_path: String,

    /// Expand instructor blocks instead of stripping them
    #[arg(long)]
    trusted: bool,

    /// Special-block markers to expand (comma separated)
    #[arg(long, value_delimiter = ',', default_value = "notes")]
    markers: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compile(args) => {
            soapbox::utils::validate_directory_exists(&args.dir)?;

            let config = soapbox::Config::load(&args.dir);
            let opts = soapbox::RenderOptions {
                toc: args.toc,
                print: args.print,
                supplemental: args.supplemental.clone(),
                static_render: args.static_render,
                asset_path: args.asset_path.clone(),
                trusted: args.trusted,
                markers: args.markers.clone(),
            };
            let renderer = soapbox::ComrakRenderer::new();

            let deck = soapbox::Compiler::new(&args.dir, &config, &opts, &renderer).compile()?;

            match &args.output {
                Some(path) => {
                    fs::write(path, &deck.html)
                        .map_err(|e| anyhow::anyhow!("Failed to write output file: {}", e))?;
                    println!(
                        "Compiled {} slides from {:?} to {:?}",
                        deck.slide_count, args.dir, path
                    );
                }
                None => {
                    print!("{}", deck.html);
                }
            }
            Ok(())
        }
    }
}
