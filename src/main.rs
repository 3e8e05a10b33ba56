use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::RgbaImage;
use log::info;

use pageprint::compose::PageLayout;
use pageprint::pipeline::Pipeline;

const DEFAULT_LOGO_URL: &str =
    "https://fiveoclock.eu/wp-content/uploads/2021/06/png_logo_r_rgb_green.png";

/// On-disk item list: a bare JSON array (`["vesper", "paris-paris"]`) or an
/// object keyed by `items`.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum Manifest {
    Items(Vec<String>),
    Keyed { items: Vec<String> },
}

impl Manifest {
    fn into_items(self) -> Vec<String> {
        match self {
            Manifest::Items(items) | Manifest::Keyed { items } => items,
        }
    }
}

/// Capture shop product pages and composite them into print-ready sheets.
#[derive(Parser, Debug)]
#[command(name = "pageprint", version, about)]
struct Cli {
    /// Item slugs to process (appended to the base URL)
    items: Vec<String>,

    /// JSON manifest listing item slugs
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Shop base URL
    #[arg(long, default_value = "https://fiveoclock.eu")]
    base_url: String,

    /// Output directory; each item gets its own subdirectory
    #[arg(long, default_value = "fiveoclock")]
    out_dir: PathBuf,

    /// Logo image file (downloaded to this path when absent)
    #[arg(long, default_value = "fiveoclock/five_logo.png")]
    logo: PathBuf,

    /// Where to download the logo from when the file does not exist yet
    #[arg(long, default_value = DEFAULT_LOGO_URL)]
    logo_url: String,

    /// Recompose sheets from previously captured fragments, without a browser
    #[arg(long)]
    offline: bool,

    /// Re-capture items even when their output directory already exists
    #[arg(long)]
    no_cache: bool,

    /// Browser scaling factor (viewport multiplier and page zoom)
    #[arg(long, default_value_t = 2)]
    scaling: u32,

    /// Pixels per base unit of the 148x210 sheet
    #[arg(long, default_value_t = 10)]
    density: u32,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let items = collect_items(&cli)?;
    if items.is_empty() {
        bail!("no items to process; pass slugs on the command line or use --manifest");
    }

    let layout = PageLayout {
        density: cli.density,
        ..Default::default()
    };
    let pipeline = Pipeline::new(&cli.out_dir)
        .with_layout(layout)
        .with_cache(!cli.no_cache);
    let logo = load_logo_asset(&cli)?;

    if cli.offline {
        for item in &items {
            pipeline
                .recompose_item(&logo, item)
                .with_context(|| format!("recompose failed for {item}"))?;
        }
        return Ok(());
    }

    run_online(&cli, &pipeline, &logo, &items)
}

fn collect_items(cli: &Cli) -> Result<Vec<String>> {
    let mut items = cli.items.clone();
    if let Some(manifest) = &cli.manifest {
        let file = File::open(manifest)
            .with_context(|| format!("cannot open manifest {}", manifest.display()))?;
        let parsed: Manifest = serde_json::from_reader(file)
            .with_context(|| format!("manifest {} is not valid", manifest.display()))?;
        items.extend(parsed.into_items());
    }
    Ok(items)
}

fn load_logo_asset(cli: &Cli) -> Result<RgbaImage> {
    if cli.logo.exists() {
        return pageprint::assets::load_logo(&cli.logo)
            .with_context(|| format!("cannot load logo {}", cli.logo.display()));
    }

    #[cfg(feature = "cdp")]
    {
        info!("logo not found locally, fetching {}", cli.logo_url);
        pageprint::assets::fetch_logo(&cli.logo_url, &cli.logo)
            .with_context(|| format!("cannot fetch logo from {}", cli.logo_url))
    }
    #[cfg(not(feature = "cdp"))]
    {
        bail!(
            "logo {} does not exist and this build cannot download it (no `cdp` feature)",
            cli.logo.display()
        );
    }
}

#[cfg(feature = "cdp")]
fn run_online(cli: &Cli, pipeline: &Pipeline, logo: &RgbaImage, items: &[String]) -> Result<()> {
    use pageprint::shop::FiveOClockScript;
    use pageprint::{Renderer, RendererConfig};

    let config = RendererConfig {
        headless: !cli.headed,
        scaling: cli.scaling,
        ..Default::default()
    };

    let mut renderer =
        pageprint::new_renderer(config.clone()).context("failed to launch the browser")?;
    pageprint::calibrate::calibrate(
        &mut renderer,
        config.scaling,
        config.viewport.width,
        config.viewport.height,
    )
    .context("resolution calibration failed")?;

    let script = FiveOClockScript::new(&cli.base_url, cli.scaling);
    let summary = pipeline
        .run(&mut renderer, &script, logo, items)
        .context("capture run failed")?;
    renderer.close().context("failed to close the browser")?;

    info!(
        "done: {} processed, {} skipped",
        summary.processed, summary.skipped
    );
    Ok(())
}

#[cfg(not(feature = "cdp"))]
fn run_online(_cli: &Cli, _pipeline: &Pipeline, _logo: &RgbaImage, _items: &[String]) -> Result<()> {
    bail!("this build has no browser backend (`cdp` feature disabled); only --offline works")
}
