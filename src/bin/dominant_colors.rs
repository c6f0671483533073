use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process;
use dominant_colors::{
    ClusterOptions, DegeneratePolicy, ErrorPolicy, ExtractOptions, MAX_CLUSTERS, export_folder,
};
use anyhow::Context;
use anyhow::Result;

/// Find the dominant colors of every JPEG in a folder and export them as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Folder containing the .jpg/.jpeg images
    #[arg(default_value = "colors")]
    folder: PathBuf,

    /// Number of dominant colors per image
    #[arg(short = 'k', long, default_value_t = 2,
          value_parser = clap::value_parser!(u16).range(1..=MAX_CLUSTERS as i64))]
    clusters: u16,

    /// Output JSON file (overwritten)
    #[arg(short, long, default_value = "fall_colors_by_image.json")]
    output: PathBuf,

    /// Seed for k-means initialisation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum k-means iterations per run
    #[arg(long, default_value_t = 300)]
    max_iter: usize,

    /// Convergence threshold on the 0..1 RGB scale
    #[arg(long, default_value_t = 0.0025)]
    converge: f32,

    /// Independent k-means runs per image; the best one is kept
    #[arg(long, default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// Shrink images so the longest side is at most this many pixels before clustering
    #[arg(long)]
    downscale: Option<u32>,

    /// What to do when an image cannot be decoded or clustered
    #[arg(long, value_enum, default_value_t = OnError::Abort)]
    on_error: OnError,

    /// What to do when an image has fewer distinct colors than clusters
    #[arg(long, value_enum, default_value_t = OnDegenerate::Duplicate)]
    on_degenerate: OnDegenerate,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnError {
    Abort,
    Skip,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnDegenerate {
    Duplicate,
    Fail,
}

impl Args {
    fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            cluster: ClusterOptions {
                clusters: usize::from(self.clusters),
                max_iter: self.max_iter,
                converge: self.converge,
                runs: self.runs,
                seed: self.seed,
                degenerate: match self.on_degenerate {
                    OnDegenerate::Duplicate => DegeneratePolicy::Duplicate,
                    OnDegenerate::Fail => DegeneratePolicy::Fail,
                },
            },
            on_error: match self.on_error {
                OnError::Abort => ErrorPolicy::Abort,
                OnError::Skip => ErrorPolicy::Skip,
            },
            downscale: self.downscale,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let opts = args.extract_options();
    log::debug!("options: {opts:?}");

    let results = export_folder(&args.folder, &args.output, &opts, |name| {
        println!("Processing file: {name}");
    })
    .with_context(|| {
        format!(
            "exporting colors of {} to {}",
            args.folder.display(),
            args.output.display()
        )
    })?;
    log::info!("{} images exported", results.len());
    println!("Colors exported to JSON: {}", args.output.display());

    Ok(())
}
