use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use svg2stl::config::FileConfig;
use svg2stl::mesh::stl::estimate_binary_size;
use svg2stl::mesh::{StlFormat, assemble, extrude, remove_degenerate, validate_facets, write_stl};
use svg2stl::svg::load_file;

/// Extrude the straight-line paths of an SVG drawing into STL solids
///
/// Every <path> in the document becomes its own STL file named
/// {input-stem}_{index}.stl.
///
/// Examples:
///   # 5mm tall solids next to the input file
///   svg2stl gear.svg -H 5
///
///   # Binary STL into a separate directory
///   svg2stl gear.svg -H 3.2 --format binary -o out/
#[derive(Parser, Debug)]
#[command(name = "svg2stl")]
#[command(version, about, long_about = None)]
struct Args {
    /// SVG file to read
    input: PathBuf,

    /// Extrusion height in mm
    #[arg(short = 'H', long)]
    height: Option<f64>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// STL flavour to write
    #[arg(long, value_enum)]
    format: Option<StlFormat>,

    /// Leave zero-area facets out of the written files
    #[arg(long)]
    drop_degenerate: bool,

    /// Path to config file (optional, auto-searches svg2stl.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };
    let file_config = file_config.unwrap_or_default();

    let height = match args.height.or(file_config.height) {
        Some(h) => h,
        None => bail!("Must provide an extrusion height with --height/-H or in the config file"),
    };
    if !height.is_finite() || height <= 0.0 {
        bail!("Extrusion height must be a positive number, got {}", height);
    }
    let format = args.format.or(file_config.format).unwrap_or_default();
    let drop_degenerate = args.drop_degenerate || file_config.drop_degenerate;
    let verbose = args.verbose || file_config.verbose;

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| file_config.output_dir.clone())
        .or_else(|| args.input.parent().map(PathBuf::from))
        .unwrap_or_default();
    let stem = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "path".to_string());

    println!("svg2stl - SVG Path Extruder");
    println!("===========================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Input: {}", args.input.display());
        println!("  Height: {}mm", height);
        println!("  Format: {:?}", format);
        println!("  Drop degenerate: {}", drop_degenerate);
        println!("  Output dir: {}", output_dir.display());
        println!();
    }

    let spinner = create_spinner("Loading SVG document...");
    let start = Instant::now();
    let document = load_file(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let paths = document.paths().context("Failed to parse path data")?;
    let (x_scale, y_scale) = document.scale();
    spinner.finish_with_message(format!(
        "Loaded {} paths ({}mm x {}mm, scale {:.3} x {:.3}) [{:.1}s]",
        paths.len(),
        document.width_mm,
        document.height_mm,
        x_scale,
        y_scale,
        start.elapsed().as_secs_f32()
    ));

    if paths.is_empty() {
        bail!("No <path> elements found in {}", args.input.display());
    }

    if !output_dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
    }

    for (index, path) in paths.iter().enumerate() {
        let name = format!("{}_{}", stem, index);
        let output_path = output_dir.join(format!("{}.stl", name));

        let spinner = create_spinner(&format!("Extruding path {}...", index));
        let start = Instant::now();

        let triangles = extrude(path, height);
        let facets = assemble(&triangles);
        let report = validate_facets(&facets);

        if verbose {
            let (w, h) = path.size();
            println!(
                "  Path {}: {} sections, {} points, {:.1}mm x {:.1}mm",
                index,
                path.sections().len(),
                path.point_count(),
                w,
                h
            );
            println!("  {}", report.summary());
            for warning in &report.warnings {
                println!("  Warning: {}", warning);
            }
        }

        if !report.is_valid() {
            bail!(
                "Path {} produced non-finite coordinates: {}",
                index,
                report.summary()
            );
        }

        let facets = if drop_degenerate {
            remove_degenerate(facets)
        } else {
            facets
        };

        write_stl(&output_path, format, &name, &facets)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;

        let size_note = match format {
            StlFormat::Binary => format!(
                " ({:.1} KB)",
                estimate_binary_size(facets.len()) as f64 / 1024.0
            ),
            StlFormat::Ascii => String::new(),
        };
        spinner.finish_with_message(format!(
            "Wrote {} facets{} to {} [{:.1}s]",
            facets.len(),
            size_note,
            output_path.display(),
            start.elapsed().as_secs_f32()
        ));
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
