use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use photofield::{
    ImageInfo, MediaSource, MemorySource, Rect, RegionConfig, Scene, SceneConfig, SceneStore,
    Thumbnail,
};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "photofield", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out a directory tree and print a scene summary as JSON.
    Scene(SceneArgs),
    /// Lay out a directory tree and print the regions visible in a rectangle as JSON.
    Regions(RegionsArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Scene configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Directory scanned when the collection lists no directories.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON array of thumbnail variants to report in regions.
    #[arg(long)]
    thumbnails: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Parser, Debug)]
struct RegionsArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Viewport as `x,y,width,height` in scene units. Defaults to the whole scene.
    #[arg(long, value_parser = parse_rect)]
    rect: Option<Rect>,

    /// Maximum number of regions, 0 for no limit.
    #[arg(long, default_value_t = 0)]
    limit: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Scene(args) => cmd_scene(args),
        Command::Regions(args) => cmd_regions(args),
    }
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let scene = build_scene(&args.source)?;
    let summary = serde_json::json!({
        "id": scene.id,
        "width": scene.bounds.width,
        "height": scene.bounds.height,
        "file_count": scene.file_count,
        "photos": scene.photos,
        "texts": scene.texts,
        "created_at": scene.created_at.to_rfc3339(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn cmd_regions(args: RegionsArgs) -> anyhow::Result<()> {
    let scene = build_scene(&args.source)?;
    let rect = args
        .rect
        .unwrap_or_else(|| Rect::new(0.0, 0.0, scene.bounds.width, scene.bounds.height));
    let regions = scene.regions_in(rect, RegionConfig { limit: args.limit })?;
    println!("{}", serde_json::to_string_pretty(&regions)?);
    Ok(())
}

fn build_scene(args: &SourceArgs) -> anyhow::Result<Arc<Scene>> {
    let config = SceneConfig::from_path(&args.config)?;

    let mut source = MemorySource::new().check_filesystem(true);
    if let Some(path) = &args.thumbnails {
        let f = std::fs::File::open(path)
            .with_context(|| format!("open thumbnails '{}'", path.display()))?;
        let thumbnails: Vec<Thumbnail> = serde_json::from_reader(std::io::BufReader::new(f))
            .with_context(|| format!("parse thumbnails '{}'", path.display()))?;
        source = source.with_image_thumbnails(thumbnails);
    }

    let roots: Vec<PathBuf> = if config.collection.dirs.is_empty() {
        vec![args.root.clone()]
    } else {
        config.collection.dirs.iter().map(PathBuf::from).collect()
    };
    for root in &roots {
        scan_dir(root, &mut source)?;
    }
    tracing::info!(files = source.len(), "scanned");

    let source = Arc::new(source);
    let store = SceneStore::default();
    let scene = store.add(
        &config,
        source.as_ref(),
        Arc::clone(&source) as Arc<dyn MediaSource>,
    )?;
    Ok(scene)
}

fn scan_dir(root: &Path, source: &mut MemorySource) -> anyhow::Result<()> {
    if !root.is_dir() {
        anyhow::bail!("not a directory: '{}'", root.display());
    }
    // Hidden directories hold generated thumbnails, not originals.
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || image::ImageFormat::from_path(path).is_err() {
            continue;
        }
        let (width, height) = match image::image_dimensions(path) {
            Ok(dims) => dims,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "skip unreadable image");
                continue;
            }
        };
        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .with_context(|| format!("read mtime of '{}'", path.display()))?;
        let date_time = DateTime::<Local>::from(modified).fixed_offset();
        source.push(
            path.to_string_lossy().into_owned(),
            ImageInfo {
                width,
                height,
                date_time,
            },
        );
    }
    Ok(())
}

fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid rect '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(Rect::new(*x, *y, x + w, y + h)),
        _ => Err(format!("rect '{s}' must be x,y,width,height")),
    }
}
