//! isotherm-atlas - render a grid file into a sprite-sheet atlas on disk
//!
//! Runs one atlas job in the foreground, logging progress. Ctrl+C stops the
//! job at the next day boundary and nothing is written.

use anyhow::{bail, Context};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use isotherm::atlas::{AtlasJob, AtlasResult, CancelToken, JobEvent, JobOutcome};
use isotherm::colormaps::ColorStop;
use isotherm::data_loader::load_grid_file;
use isotherm::{init_tracing, RenderOptions};

/// Command-line arguments for the atlas renderer
#[derive(Parser, Debug)]
#[command(name = "isotherm-atlas")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the grid file (JSON or raw little-endian f32)
    grid_file: PathBuf,

    /// Number of days in the grid file (inferred from its size when omitted)
    #[arg(short, long)]
    days: Option<usize>,

    /// Output JPEG path; the geometry is written next to it as JSON
    #[arg(short, long, default_value = "atlas.jpg")]
    output: PathBuf,

    /// Built-in colorway (thermal, classic, earth, vivid)
    #[arg(long, conflicts_with = "stops")]
    colorway: Option<String>,

    /// JSON file holding a custom stop table
    #[arg(long)]
    stops: Option<PathBuf>,

    /// Blur radius in pixels at 2048 px width
    #[arg(long, default_value_t = 0.0)]
    blur_radius: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ISOTHERM_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let options = render_options(&args)?;
    let grid = load_grid_file(&args.grid_file, args.days)
        .with_context(|| format!("loading {}", args.grid_file.display()))?;
    let num_days = grid.num_days();
    let job = AtlasJob::new(grid, num_days, &options)?;
    let geometry = job.geometry();

    info!(
        job_id = %job.id(),
        num_days,
        width = geometry.width,
        height = geometry.height,
        "Rendering atlas"
    );

    let token = CancelToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, stopping after the current day");
            ctrl_c_token.cancel();
        }
    });

    let start = Instant::now();
    let mut result: Option<AtlasResult> = None;
    let outcome = job
        .run(token, |event| match event {
            JobEvent::Progress { done, total } => {
                info!(done, total, "{:.0}% rendered", done as f64 * 100.0 / total as f64);
            }
            JobEvent::Completed(atlas) => result = Some(atlas),
            JobEvent::Failed { .. } => {}
        })
        .await?;

    match (outcome, result) {
        (JobOutcome::Completed(_), Some(atlas)) => {
            write_atlas(&args.output, &atlas)?;
            info!(
                output = %args.output.display(),
                bytes = atlas.bytes.len(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Atlas written"
            );
            Ok(())
        }
        (JobOutcome::Cancelled { done }, _) => {
            bail!("cancelled after {done} of {num_days} day(s); nothing written")
        }
        (JobOutcome::Completed(_), None) => bail!("job finished without a result"),
    }
}

fn render_options(args: &Args) -> anyhow::Result<RenderOptions> {
    let options = match (&args.colorway, &args.stops) {
        (_, Some(path)) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let stops: Vec<ColorStop> = serde_json::from_str(&content)
                .with_context(|| format!("parsing stops in {}", path.display()))?;
            RenderOptions::with_custom_stops(stops)
        }
        (Some(colorway), None) => RenderOptions::with_colorway(colorway.clone()),
        (None, None) => RenderOptions::default(),
    };
    Ok(options.blur(args.blur_radius))
}

fn write_atlas(output: &Path, atlas: &AtlasResult) -> anyhow::Result<()> {
    std::fs::write(output, &atlas.bytes)
        .with_context(|| format!("writing {}", output.display()))?;

    let sidecar = output.with_extension("json");
    let json = serde_json::to_string_pretty(&atlas.geometry)?;
    std::fs::write(&sidecar, json).with_context(|| format!("writing {}", sidecar.display()))?;
    Ok(())
}
