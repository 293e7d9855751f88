//! `bible-atlas` command-line interface.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bible_atlas::{BuildConfig, Catalog, MarkerFilter};

#[derive(Parser)]
#[command(name = "bible-atlas")]
#[command(version, about = "Join modern locations and ancient places into map artifacts")]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read both datasets and write every artifact
    Build(BuildArgs),

    /// Print a marker and its ancient places as JSON
    Select {
        marker_id: String,
        #[arg(long, default_value = "public/data")]
        out_dir: PathBuf,
    },

    /// List markers matching a search and type filter
    Search {
        query: Option<String>,
        /// Allowed marker type; repeat for several
        #[arg(long = "type")]
        types: Vec<String>,
        #[arg(long, default_value = "public/data")]
        out_dir: PathBuf,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Directory holding modern.jsonl and ancient.jsonl
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Directory of *.geojson files to copy
    #[arg(long, default_value = "geometry")]
    geometry_dir: PathBuf,
    #[arg(long, default_value = "public/data")]
    out_dir: PathBuf,
    /// Override the modern locations file
    #[arg(long)]
    modern: Option<PathBuf>,
    /// Override the ancient places file
    #[arg(long)]
    ancient: Option<PathBuf>,
}

impl BuildArgs {
    fn into_config(self) -> BuildConfig {
        let mut config = BuildConfig::from_data_dir(&self.data_dir, self.geometry_dir, self.out_dir);
        if let Some(path) = self.modern {
            config = config.with_modern_path(path);
        }
        if let Some(path) = self.ancient {
            config = config.with_ancient_path(path);
        }
        config
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            let config = args.into_config();
            let summary = bible_atlas::build(&config).context("atlas build failed")?;
            println!("Processed {} modern locations", summary.markers);
            println!("Processed {} ancient places ({} resolved)", summary.places, summary.resolved);
            println!("Copied {} GeoJSON files", summary.geometry_files);
            println!("Verse index covers {} books", summary.books);
        }
        Commands::Select { marker_id, out_dir } => {
            let catalog = Catalog::load(&out_dir)?;
            let selection = catalog.select(&marker_id)?;
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        Commands::Search { query, types, out_dir } => {
            let catalog = Catalog::load(&out_dir)?;
            let mut filter = MarkerFilter::new().with_query(query.unwrap_or_default());
            for kind in types {
                filter = filter.with_type(kind);
            }
            let mut shown = 0;
            for marker in catalog.filter(&filter) {
                println!("{}\t{}\t{}", marker.id, marker.kind, marker.name);
                shown += 1;
            }
            eprintln!("Showing {shown} of {} places", catalog.markers().len());
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "bible_atlas=info",
        1 => "bible_atlas=debug",
        _ => "bible_atlas=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
