//! CLI tool for assembling feature slide decks.

mod mirror;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use deck_core::{DeckConfig, FeatureRecord, ImageSource, NoImages, Timeframe};
use deck_pptx::{text_body, Deck, DeckBuilder, LayoutReader, SlideLayout};
use mirror::MirrorImageSource;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// The whole deck as JSON.
    Json,
    /// One DrawingML text body per text region.
    Drawingml,
}

/// Assemble slide decks from product feature records.
#[derive(Parser, Debug)]
#[command(name = "feature-deck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Feature records as a JSON array
    #[arg(required = true)]
    features: PathBuf,

    /// Configuration file (JSON); missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PPTX template to read slide layouts from
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Layout number in the template for feature slides
    #[arg(long, default_value = "1", requires = "template")]
    feature_layout: usize,

    /// Layout number in the template for section slides
    #[arg(long, default_value = "2", requires = "template")]
    section_layout: usize,

    /// Directory holding downloaded images, looked up by file name
    #[arg(short, long)]
    images: Option<PathBuf>,

    /// Only include features owned by this email
    #[arg(long)]
    owner_email: Option<String>,

    /// Start of the timeframe filter (YYYY-MM-DD)
    #[arg(long, requires = "timeframe_end")]
    timeframe_start: Option<NaiveDate>,

    /// End of the timeframe filter (YYYY-MM-DD)
    #[arg(long, requires = "timeframe_start")]
    timeframe_end: Option<NaiveDate>,

    /// Build a flat deck without group cover slides
    #[arg(long)]
    no_grouping: bool,

    /// Images per feature slide (1-4)
    #[arg(long)]
    max_images: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = load_config(&args)?;
    let features = read_features(&args.features)?;
    log::info!("Read {} feature records", features.len());

    let (feature_layout, section_layout) = load_layouts(&args)?;

    let mirror = args.images.as_ref().map(MirrorImageSource::new);
    let images: &dyn ImageSource = match &mirror {
        Some(source) => {
            log::debug!("Resolving images from {}", source.root().display());
            source
        }
        None => &NoImages,
    };

    let deck = DeckBuilder::new(&config, feature_layout, section_layout).build(features, images);

    if args.verbose {
        eprintln!("Assembled {} slides", deck.slides.len());
    }

    let output = match args.format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&deck).context("Failed to serialize deck")? + "\n"
        }
        OutputFormat::Drawingml => render_drawingml(&deck)?,
    };

    match &args.output {
        Some(path) => write_output(path, &output)?,
        None => print!("{}", output),
    }

    Ok(())
}

/// Load the configuration file, if any, and apply command-line overrides.
fn load_config(args: &Args) -> Result<DeckConfig> {
    let mut config = match &args.config {
        Some(path) => DeckConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeckConfig::default(),
    };

    if let Some(owner) = &args.owner_email {
        config.owner_email = Some(owner.clone());
    }
    if let (Some(start), Some(end)) = (args.timeframe_start, args.timeframe_end) {
        config.timeframe = Some(Timeframe::new(start, end));
    }
    if args.no_grouping {
        config.group_by_initiative = false;
    }
    if let Some(max) = args.max_images {
        config.max_images = max;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Read feature records from a JSON array.
fn read_features(path: &Path) -> Result<Vec<FeatureRecord>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse feature records in {}", path.display()))
}

/// Read the feature and section layouts from the template, or use the built-in ones.
fn load_layouts(args: &Args) -> Result<(SlideLayout, SlideLayout)> {
    let Some(template) = &args.template else {
        return Ok((SlideLayout::feature_default(), SlideLayout::section_default()));
    };

    let reader = LayoutReader::new();
    let mut layouts = Vec::with_capacity(2);
    for number in [args.feature_layout, args.section_layout] {
        let file = File::open(template)
            .with_context(|| format!("Failed to open {}", template.display()))?;
        let layout = reader
            .read(BufReader::new(file), number)
            .with_context(|| format!("Failed to read layout {} from {}", number, template.display()))?;
        layouts.push(layout);
    }

    let section = layouts.pop().context("missing section layout")?;
    let feature = layouts.pop().context("missing feature layout")?;
    Ok((feature, section))
}

/// Render every text region of every slide as DrawingML.
fn render_drawingml(deck: &Deck) -> Result<String> {
    let mut output = String::new();

    for (number, slide) in deck.slides.iter().enumerate() {
        for region in &slide.regions {
            if region.paragraphs.is_empty() {
                continue;
            }
            let body = text_body(region)
                .with_context(|| format!("Failed to render slide {} region {:?}", number + 1, region.key))?;

            output.push_str(&format!(
                "<!-- slide {} ({}) region {} -->\n{}\n",
                number + 1,
                slide.layout,
                region.key.0,
                body.xml
            ));
            for (id, target) in &body.hyperlinks {
                output.push_str(&format!("<!-- {} -> {} -->\n", id, target));
            }
        }
    }

    Ok(output)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
