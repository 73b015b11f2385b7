use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "overprint", version)]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// TrueType/OpenType face override; used for preview and stamping alike.
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp the statement onto the full-resolution image.
    Stamp(OverlayArgs),
    /// Render the downscaled preview frame.
    Preview(OverlayArgs),
    /// Print the overlay plan as JSON without writing pixels.
    Plan(PlanArgs),
    /// Stamp every entry of a JSON manifest on the worker pool.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Promoter statement text.
    #[arg(long)]
    statement: String,

    /// top-left, top-right, bottom-left or bottom-right; config default when omitted.
    #[arg(long)]
    anchor: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Promoter statement text.
    #[arg(long)]
    statement: String,

    /// Target corner; config default when omitted.
    #[arg(long)]
    anchor: Option<String>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array of `{ "input", "statement", "anchor"?, "output"? }` entries.
    #[arg(long)]
    manifest: PathBuf,

    /// Directory for stamped PNGs.
    #[arg(long)]
    out_dir: PathBuf,

    /// Worker count override.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestEntry {
    input: PathBuf,
    statement: String,
    #[serde(default)]
    anchor: Option<String>,
    #[serde(default)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;

    tracing_subscriber::fmt()
        .with_max_level(cfg.level()?)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Stamp(args) => cmd_stamp(&cfg, args),
        Command::Preview(args) => cmd_preview(&cfg, args),
        Command::Plan(args) => cmd_plan(&cfg, args),
        Command::Batch(args) => cmd_batch(cfg, args),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<overprint::OverprintConfig> {
    let mut cfg = match &cli.config {
        Some(path) => overprint::OverprintConfig::from_path(path)?,
        None => overprint::OverprintConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        cfg.log_level = level.clone();
    }
    if let Some(font) = &cli.font {
        cfg.font_path = Some(font.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}

fn anchor_or_default(
    anchor: Option<&str>,
    cfg: &overprint::OverprintConfig,
) -> anyhow::Result<overprint::Anchor> {
    match anchor {
        Some(s) => Ok(s.parse()?),
        None => Ok(cfg.default_anchor),
    }
}

fn cmd_stamp(cfg: &overprint::OverprintConfig, args: OverlayArgs) -> anyhow::Result<()> {
    let anchor = anchor_or_default(args.anchor.as_deref(), cfg)?;
    let font = cfg.font_face()?;
    let image = overprint::load_raster(&args.in_path)?;

    let out = overprint::stamp(&image, &args.statement, anchor, &font)?;
    overprint::save_png(&out.raster, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_preview(cfg: &overprint::OverprintConfig, args: OverlayArgs) -> anyhow::Result<()> {
    let anchor = anchor_or_default(args.anchor.as_deref(), cfg)?;
    let font = cfg.font_face()?;
    let image = Arc::new(overprint::load_raster(&args.in_path)?);

    let mut session = overprint::PreviewSession::new();
    let req = session.submit(image, args.statement, anchor);
    let frame = overprint::render_preview(&req, &font, cfg.preview_max_width)?;
    overprint::save_png(&frame.raster, &args.out)?;

    eprintln!(
        "wrote {} ({}x{}, scale {:.3})",
        args.out.display(),
        frame.raster.width(),
        frame.raster.height(),
        frame.scale
    );
    Ok(())
}

fn cmd_plan(cfg: &overprint::OverprintConfig, args: PlanArgs) -> anyhow::Result<()> {
    let anchor = anchor_or_default(args.anchor.as_deref(), cfg)?;
    let font = cfg.font_face()?;
    let image = overprint::load_raster(&args.in_path)?;
    let statement = overprint::Statement::parse(&args.statement)?;

    let mut shaper = font.shaper()?;
    let mut surface = overprint::CpuSurface::new(image, &mut shaper);
    let plan = overprint::plan_overlay(&mut surface, &statement, anchor)?;

    let json = serde_json::to_string_pretty(&plan).context("serialize overlay plan")?;
    println!("{json}");
    Ok(())
}

fn read_manifest(path: &Path) -> anyhow::Result<Vec<ManifestEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read manifest '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| "parse manifest JSON")
}

fn output_path(entry: &ManifestEntry, out_dir: &Path) -> PathBuf {
    match &entry.output {
        Some(p) => out_dir.join(p),
        None => {
            let stem = entry
                .input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_owned());
            out_dir.join(format!("{stem}-stamped.png"))
        }
    }
}

fn cmd_batch(mut cfg: overprint::OverprintConfig, args: BatchArgs) -> anyhow::Result<()> {
    if args.threads.is_some() {
        cfg.threads = args.threads;
        cfg.validate()?;
    }
    let entries = read_manifest(&args.manifest)?;
    let base = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let pool = overprint::StampPool::new(cfg.font_face()?, cfg.threads)?;

    // Entries that fail before stamping (bad anchor, unreadable image) are reported but do
    // not stop the rest of the batch.
    let mut failures: Vec<String> = Vec::new();
    let mut jobs: Vec<(usize, overprint::StampRequest)> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let prepared = anchor_or_default(entry.anchor.as_deref(), &cfg).and_then(|anchor| {
            let image = overprint::load_raster(&base.join(&entry.input))?;
            Ok(overprint::StampRequest {
                image,
                statement: entry.statement.clone(),
                anchor,
            })
        });
        match prepared {
            Ok(req) => jobs.push((i, req)),
            Err(e) => failures.push(format!("{}: {e:#}", entry.input.display())),
        }
    }

    let (indices, requests): (Vec<usize>, Vec<overprint::StampRequest>) =
        jobs.into_iter().unzip();
    let results = pool.stamp_batch(requests);

    let mut written = 0usize;
    for (i, result) in indices.into_iter().zip(results) {
        let entry = &entries[i];
        let saved = result.map_err(anyhow::Error::from).and_then(|out| {
            overprint::save_png(&out.raster, &output_path(entry, &args.out_dir))?;
            Ok(())
        });
        match saved {
            Ok(()) => written += 1,
            Err(e) => failures.push(format!("{}: {e:#}", entry.input.display())),
        }
    }

    eprintln!("wrote {written} of {} images to {}", entries.len(), args.out_dir.display());
    if !failures.is_empty() {
        for f in &failures {
            eprintln!("  failed {f}");
        }
        anyhow::bail!("{} of {} manifest entries failed", failures.len(), entries.len());
    }
    Ok(())
}
