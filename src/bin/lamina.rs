use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lamina", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a content pack into a PNG.
    Compose(ComposeArgs),
    /// Parse and validate a content pack manifest.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Content pack directory (holds manifest.json).
    #[arg(long)]
    pack: PathBuf,

    /// Layer count configuration JSON; defaults to the pack's recommendation.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Content pack directory (holds manifest.json).
    #[arg(long)]
    pack: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let pack = lamina::ContentPack::open(&args.pack)?;

    let config: Vec<lamina::LayerCount> = match &args.config {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            serde_json::from_slice(&bytes).with_context(|| "parse config JSON")?
        }
        None => lamina::effective_config(pack.manifest(), pack.recommended()),
    };

    let mut catalog = lamina::AssetCatalog::new(&pack.manifest().images);
    catalog.load_all(&pack)?;

    let mut engine = lamina::CompositionEngine::new(&catalog, pack.manifest(), &config)?;
    let mut surface = lamina::RasterSurface::new();
    let size = engine.draw(&mut surface)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        surface.data(),
        size.width,
        size.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let pack = lamina::ContentPack::open(&args.pack)?;
    let manifest = pack.manifest();
    eprintln!(
        "ok: {} images, {} layers, {} order groups",
        manifest.images.len(),
        manifest.layers.len(),
        manifest.order.len()
    );
    Ok(())
}
