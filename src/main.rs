//! Poster Common CLI
//!
//! Usage:
//!   poster-common [--catalog <FILE>] <COMMAND>
//!
//! Commands:
//!   sizes          List poster sizes, optionally for one material
//!   styles         List poster styles, optionally for one material
//!   map-style      Show a map style
//!   dimensions     Physical dimensions of a size in centimeters
//!   closest-size   Closest size in another unit system
//!   product-id     Encode a poster configuration as a product id
//!   decorate       Apply a poster style to an SVG file and print it

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use poster_common::svg::{parse_number, NodeId};
use poster_common::{
    create_product_id, decorate, BoundingBox, Catalog, DecorateConfig, LabelTexts, Orientation,
    OriginalAttributes, ProductConfig, SizeUnit, SvgDocument, SvgTree,
};

/// Average glyph advance as a fraction of the font size
const AVERAGE_GLYPH_ADVANCE: f64 = 0.6;

/// Cap height as a fraction of the font size
const CAP_HEIGHT: f64 = 0.8;

#[derive(Parser)]
#[command(name = "poster-common")]
#[command(about = "Poster catalog lookups and SVG decoration")]
struct Cli {
    /// Catalog file (TOML); the bundled catalog is used if not provided
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List poster sizes
    Sizes {
        #[arg(short, long)]
        material: Option<String>,
    },
    /// List poster styles
    Styles {
        #[arg(short, long)]
        material: Option<String>,
    },
    /// Show a map style; unknown ids show the default theme
    MapStyle { id: String },
    /// Physical dimensions of a size in centimeters
    Dimensions {
        size: String,
        #[arg(short, long, default_value = "portrait")]
        orientation: Orientation,
    },
    /// Closest size in another unit system (cm or inch)
    ClosestSize { size: String, unit: SizeUnit },
    /// Encode a poster configuration as a product id
    ProductId {
        #[arg(long)]
        style: String,
        #[arg(long)]
        map_style: String,
        #[arg(long, default_value = "portrait")]
        orientation: Orientation,
        #[arg(long)]
        size: String,
        #[arg(long)]
        city_id: String,
    },
    /// Apply a poster style to an SVG file and print the result
    Decorate {
        input: PathBuf,
        #[arg(long)]
        style: String,
        #[arg(long)]
        header: String,
        #[arg(long, default_value = "")]
        small_header: String,
        #[arg(long, default_value = "")]
        text: String,
        /// Draw the estimated bounding box of the small header
        #[arg(long)]
        debug_lines: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let owned;
    let catalog = match &cli.catalog {
        Some(path) => match Catalog::from_file(path) {
            Ok(c) => {
                owned = c;
                &owned
            }
            Err(e) => {
                eprintln!("Error loading catalog '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Catalog::builtin(),
    };

    match run(catalog, cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(catalog: &Catalog, command: Command) -> Result<String, Box<dyn std::error::Error>> {
    let output = match command {
        Command::Sizes { material } => {
            let sizes = match material {
                Some(id) => catalog.poster_sizes(&id)?,
                None => catalog.sizes().iter().collect(),
            };
            sizes
                .iter()
                .map(|s| format!("{}\t{}\t{}", s.id, s.label, s.unit))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Command::Styles { material } => {
            let styles = match material {
                Some(id) => catalog.poster_styles(&id)?,
                None => catalog.styles().iter().map(std::borrow::Cow::Borrowed).collect(),
            };
            styles
                .iter()
                .map(|s| {
                    let map_styles = s
                        .allowed_map_styles
                        .as_ref()
                        .map_or_else(|| "*".to_string(), |ids| ids.join(","));
                    format!("{}\t{}\t{}", s.id, s.name, map_styles)
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
        Command::MapStyle { id } => {
            let style = catalog.map_style(&id);
            format!(
                "{}\t{}\t{}\t{}\t{}",
                style.id, style.name, style.color, style.label_color, style.render_type
            )
        }
        Command::Dimensions { size, orientation } => {
            let dims = catalog.physical_dimensions_in_cm(&size, orientation)?;
            format!(
                "{} x {} cm\nmiddle line stroke width: {}",
                dims.width,
                dims.height,
                catalog.middle_line_stroke_width(&size)
            )
        }
        Command::ClosestSize { size, unit } => {
            catalog.closest_size_for_other_size_type(&size, unit)?.id.clone()
        }
        Command::ProductId {
            style,
            map_style,
            orientation,
            size,
            city_id,
        } => {
            catalog.poster_style(&style, None)?;
            catalog.poster_size(&size)?;
            let config = ProductConfig::new(style, map_style, orientation, size, city_id);
            create_product_id(catalog, &config)
        }
        Command::Decorate {
            input,
            style,
            header,
            small_header,
            text,
            debug_lines,
        } => {
            let source = fs::read_to_string(&input)
                .map_err(|e| format!("reading file '{}': {}", input.display(), e))?;
            let mut doc = SvgTree::parse(&source)?;
            let labels = LabelTexts::new(header, small_header, text);
            let config = DecorateConfig::new().with_debug_lines(debug_lines);
            decorate(
                &mut doc,
                &mut OriginalAttributes::new(),
                catalog,
                &style,
                &labels,
                estimate_text_box,
                &config,
            )?;
            doc.to_svg_string()
        }
    };
    Ok(output)
}

/// Rough rendered size of a text element from its font attributes
fn estimate_text_box(doc: &SvgTree, text: NodeId) -> BoundingBox {
    let number = |name: &str| doc.attribute(text, name).and_then(parse_number);
    let font_size = number("font-size").unwrap_or(0.0);
    let letter_spacing = number("letter-spacing").unwrap_or(0.0);
    let chars = doc.text_content(text).chars().count() as f64;
    let spacing = (chars - 1.0).max(0.0) * letter_spacing;
    BoundingBox::new(
        chars * font_size * AVERAGE_GLYPH_ADVANCE + spacing,
        font_size * CAP_HEIGHT,
    )
}
