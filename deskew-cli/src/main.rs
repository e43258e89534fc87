use clap::Parser;
use deskew::io::{load_raster, save_raster};
use deskew::{
    compose_page, skew_page, Candidate, DeskewConfig, Deskewer, GlyphSet, Interpolation,
    PageLayout,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod plot;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Deskew CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
enum InterpolationConfig {
    Nearest,
    Bilinear,
    Bicubic,
}

impl From<InterpolationConfig> for Interpolation {
    fn from(value: InterpolationConfig) -> Self {
        match value {
            InterpolationConfig::Nearest => Interpolation::Nearest,
            InterpolationConfig::Bilinear => Interpolation::Bilinear,
            InterpolationConfig::Bicubic => Interpolation::Bicubic,
        }
    }
}

impl From<Interpolation> for InterpolationConfig {
    fn from(value: Interpolation) -> Self {
        match value {
            Interpolation::Nearest => InterpolationConfig::Nearest,
            Interpolation::Bilinear => InterpolationConfig::Bilinear,
            Interpolation::Bicubic => InterpolationConfig::Bicubic,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DeskewConfigJson {
    min_deg: f32,
    max_deg: f32,
    step_deg: f32,
    search_interpolation: InterpolationConfig,
    correction_interpolation: InterpolationConfig,
    parallel: bool,
}

impl Default for DeskewConfigJson {
    fn default() -> Self {
        let cfg = DeskewConfig::default();
        Self {
            min_deg: cfg.min_deg,
            max_deg: cfg.max_deg,
            step_deg: cfg.step_deg,
            search_interpolation: cfg.search_interpolation.into(),
            correction_interpolation: cfg.correction_interpolation.into(),
            parallel: cfg.parallel,
        }
    }
}

impl From<DeskewConfigJson> for DeskewConfig {
    fn from(value: DeskewConfigJson) -> Self {
        Self {
            min_deg: value.min_deg,
            max_deg: value.max_deg,
            step_deg: value.step_deg,
            search_interpolation: value.search_interpolation.into(),
            correction_interpolation: value.correction_interpolation.into(),
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateConfigJson {
    glyph_dir: PathBuf,
    text_path: PathBuf,
    #[serde(default)]
    angle_deg: f32,
    #[serde(default = "default_margin")]
    margin: usize,
    #[serde(default = "default_line_spacing")]
    line_spacing: usize,
    #[serde(default = "default_char_spacing")]
    char_spacing: usize,
}

fn default_margin() -> usize {
    PageLayout::default().margin
}

fn default_line_spacing() -> usize {
    PageLayout::default().line_spacing
}

fn default_char_spacing() -> usize {
    PageLayout::default().char_spacing
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: String,
    report_path: Option<String>,
    plot_path: Option<String>,
    deskew: DeskewConfigJson,
    generate: Option<GenerateConfigJson>,
}

#[derive(Debug, Serialize)]
struct ScoreRecord {
    angle_deg: f32,
    score: f64,
}

impl From<Candidate> for ScoreRecord {
    fn from(value: Candidate) -> Self {
        Self {
            angle_deg: value.angle_deg,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    angle_deg: f32,
    score: f64,
    input_size: [usize; 2],
    output_size: [usize; 2],
    scores: Vec<ScoreRecord>,
}

fn parse_config(text: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config: Config = serde_json::from_str(text)?;
    if config.input_path.is_empty() || config.output_path.is_empty() {
        return Err("input_path and output_path must be set in the config".into());
    }
    Ok(config)
}

fn generate_page(gen: &GenerateConfigJson, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(&gen.text_path)?;
    let glyphs = GlyphSet::load_dir(&gen.glyph_dir, &text.to_lowercase())?;
    let layout = PageLayout {
        margin: gen.margin,
        line_spacing: gen.line_spacing,
        char_spacing: gen.char_spacing,
    };
    let page = compose_page(&text, &glyphs, layout)?;
    let skewed = skew_page(&page, gen.angle_deg, Interpolation::Nearest)?;
    save_raster(&skewed, output)?;
    tracing::info!(
        path = output,
        width = skewed.width(),
        height = skewed.height(),
        angle_deg = gen.angle_deg,
        "generated page"
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("deskew=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config = parse_config(&fs::read_to_string(&cli.config)?)?;

    if let Some(gen) = &config.generate {
        generate_page(gen, &config.input_path)?;
    }

    let deskewer = Deskewer::new(config.deskew.into())?;
    let raster = load_raster(&config.input_path)?;
    let result = deskewer.deskew(&raster)?;
    save_raster(&result.raster, &config.output_path)?;

    if let Some(path) = &config.plot_path {
        plot::render_energy_plot(&result.estimate, path)?;
    }

    let report = Report {
        angle_deg: result.angle_deg(),
        score: result.estimate.score,
        input_size: [raster.width(), raster.height()],
        output_size: [result.raster.width(), result.raster.height()],
        scores: result
            .estimate
            .table
            .iter()
            .copied()
            .map(ScoreRecord::from)
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    match config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    eprintln!("Final rotation: {:.2}\u{b0}", result.angle_deg());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_parses() {
        let config = parse_config(EXAMPLE_JSON).unwrap();
        assert_eq!(config.report_path.as_deref(), Some("pages/report.json"));
        assert!(config.deskew.parallel);
        let cfg = DeskewConfig::from(config.deskew);
        assert_eq!(cfg.step_deg, 0.5);
        assert_eq!(cfg.search_interpolation, Interpolation::Bicubic);
        assert_eq!(cfg.correction_interpolation, Interpolation::Nearest);
        let gen = config.generate.unwrap();
        assert_eq!(gen.angle_deg, 20.0);
        assert_eq!(gen.char_spacing, 1);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = parse_config(r#"{"input_path": "in.png", "output_path": "out.png"}"#).unwrap();
        assert_eq!(DeskewConfig::from(config.deskew), DeskewConfig::default());
        assert!(config.report_path.is_none());
        assert!(config.plot_path.is_none());
        assert!(config.generate.is_none());
    }

    #[test]
    fn generate_section_uses_layout_defaults() {
        let text = r#"{
            "input_path": "in.png",
            "output_path": "out.png",
            "generate": {"glyph_dir": "glyphs", "text_path": "page.txt"}
        }"#;
        let gen = parse_config(text).unwrap().generate.unwrap();
        let layout = PageLayout::default();
        assert_eq!(gen.angle_deg, 0.0);
        assert_eq!(gen.margin, layout.margin);
        assert_eq!(gen.line_spacing, layout.line_spacing);
        assert_eq!(gen.char_spacing, layout.char_spacing);
    }

    #[test]
    fn empty_config_is_rejected() {
        let err = parse_config("{}").unwrap_err();
        assert!(err.to_string().contains("input_path"));
        assert!(parse_config(r#"{"input_path": "in.png"}"#).is_err());
    }
}
