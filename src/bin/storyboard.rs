use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storyboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one frame and print its statistics as JSON.
    Frame(FrameArgs),
    /// Write the storyboard in the line-oriented text form.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input storyboard document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame time in milliseconds.
    #[arg(long)]
    time: f64,

    /// Draw settings JSON. Texture roots default to the document's directory.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Fire a trigger before compositing, as `NAME@MS`. Repeatable.
    #[arg(long = "trigger", value_parser = parse_trigger)]
    triggers: Vec<(String, f64)>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input storyboard document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output text path.
    #[arg(long)]
    out: PathBuf,

    /// Export settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn parse_trigger(s: &str) -> Result<(String, f64), String> {
    let (name, time) = s
        .rsplit_once('@')
        .ok_or_else(|| format!("expected NAME@MS, got '{s}'"))?;
    let time = time
        .parse::<f64>()
        .map_err(|e| format!("bad trigger time '{time}': {e}"))?;
    Ok((name.to_string(), time))
}

fn read_storyboard(path: &Path) -> anyhow::Result<storyboard::Storyboard> {
    let doc = storyboard::StoryboardDocument::from_json_file(path)?;
    Ok(doc.build()?)
}

#[derive(Default)]
struct CountingRenderer {
    quads: usize,
    additive: usize,
}

impl<T> storyboard::QuadRenderer<T> for CountingRenderer {
    fn draw_quad(&mut self, quad: &storyboard::Quad<'_, T>) {
        self.quads += 1;
        if quad.blend == storyboard::BlendMode::Additive {
            self.additive += 1;
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut sb = read_storyboard(&args.in_path)?;

    let settings = match &args.settings {
        Some(path) => storyboard::DrawSettings::from_json_file(path)?,
        None => {
            let root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
            storyboard::DrawSettings {
                mapset_path: root.to_path_buf(),
                project_asset_path: root.join("assetlibrary"),
                ..storyboard::DrawSettings::default()
            }
        }
    };

    for (name, time) in &args.triggers {
        let fired = sb.trigger(name, *time);
        tracing::info!(trigger = %name, time, fired, "trigger fired");
    }

    let mut textures = storyboard::FsTextureStore::new();
    let mut renderer = CountingRenderer::default();
    let mut stats = storyboard::FrameStats::new();
    storyboard::draw_storyboard(
        &sb,
        args.time,
        &settings,
        &mut textures,
        &mut renderer,
        &mut stats,
    );

    println!("{}", stats.to_json_pretty()?);
    eprintln!(
        "drew {} quads ({} additive) at {}ms",
        renderer.quads, renderer.additive, args.time
    );
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let sb = read_storyboard(&args.in_path)?;
    let settings = match &args.settings {
        Some(path) => storyboard::ExportSettings::from_json_file(path)?,
        None => storyboard::ExportSettings::default(),
    };

    let text = sb.to_osb_string(&settings)?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, text)
        .with_context(|| format!("write storyboard '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
