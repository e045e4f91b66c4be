//! aovgrade — grade one AOV and composite it back into the beauty pass.
//!
//! Loads beauty, AOV and optional mask images plus a JSON parameter file,
//! runs the parallel frame driver, and writes the result.

mod config;
mod image_loader;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use aovgrade_core::{GradeTransform, grade_frame};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, ParamOverrides, check_output, load_params};
use crate::image_loader::{load_image, save_image};

#[derive(Parser)]
#[command(name = "aovgrade")]
#[command(author, version, about = "Grade an AOV and put it back into the beauty")]
#[command(long_about = "
Grades one render pass (AOV) with blackpoint/whitepoint/lift/gain/multiply/
offset/gamma controls and composites it back into the beauty image:
out = beauty - aov + graded_aov.

Examples:
  aovgrade -b beauty.exr -a specular.exr -p warm.json -o out.exr
  aovgrade -b beauty.exr -a diffuse.exr -m matte.exr --mix 0.5 -o out.exr
  aovgrade -b beauty.exr -a specular.exr -p warm.json --view-aov -o specular_graded.exr
")]
struct Cli {
    /// Beauty image (premultiplied RGBA)
    #[arg(short, long)]
    beauty: PathBuf,

    /// AOV image to grade (premultiplied RGBA)
    #[arg(short, long)]
    aov: PathBuf,

    /// Mask image; only its alpha is read. Enables masking.
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// JSON grade parameters; missing fields take their defaults
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Output image
    #[arg(short, long)]
    output: PathBuf,

    /// Output the graded AOV alone
    #[arg(long)]
    view_aov: bool,

    /// Undo the grade instead of applying it
    #[arg(long)]
    reverse: bool,

    /// Grade straight colour (AOV divided by beauty alpha)
    #[arg(long)]
    unpremult: bool,

    /// Mix between original and graded AOV
    #[arg(long)]
    mix: Option<f32>,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::default().with_overrides(cli.threads, cli.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_target(false)
        .init();

    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let mut inputs = vec![cli.beauty.as_path(), cli.aov.as_path()];
    if let Some(mask) = &cli.mask {
        inputs.push(mask.as_path());
    }
    if let Some(params) = &cli.params {
        inputs.push(params.as_path());
    }
    let output = check_output(&cli.output, &inputs)?;

    let overrides = ParamOverrides {
        view_aov: cli.view_aov,
        reverse: cli.reverse,
        unpremult: cli.unpremult,
        use_mask: cli.mask.is_some(),
        mix: cli.mix,
    };
    let params = overrides.apply(load_params(cli.params.as_deref())?);
    if params.use_mask && cli.mask.is_none() {
        tracing::warn!("use_mask is set but no mask was given; mask reads as fully on");
    }

    let beauty = load_image(&cli.beauty)
        .with_context(|| format!("failed to load beauty {}", cli.beauty.display()))?;
    let aov = load_image(&cli.aov)
        .with_context(|| format!("failed to load AOV {}", cli.aov.display()))?;
    let mask = cli
        .mask
        .as_deref()
        .map(|path| {
            load_image(path).with_context(|| format!("failed to load mask {}", path.display()))
        })
        .transpose()?;

    if aov.dimensions() != beauty.dimensions() {
        tracing::warn!(
            beauty = ?beauty.dimensions(),
            aov = ?aov.dimensions(),
            "AOV size differs from beauty; edges are clamped"
        );
    }

    let transform = GradeTransform::new(params);
    let start = Instant::now();
    let graded = grade_frame(&transform, &beauty, &aov, mask.as_ref())?;
    tracing::info!(
        width = graded.width,
        height = graded.height,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "graded frame"
    );

    save_image(&output, &graded)
        .with_context(|| format!("failed to write {}", output.display()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}
