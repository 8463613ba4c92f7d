use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use geomprops::detection::{build_standard_pipeline, loader};
use geomprops::{
    AdaptiveMethod, AnalysisReport, Binarization, ContourAnalyzer, Figure, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "geomprops")]
#[command(about = "Find objects in an image and measure their area and centroid")]
struct Cli {
    /// Image to analyze; opens the viewer window when omitted
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Save stage images and panels to directory (must be empty)
    #[arg(long, value_name = "DIR")]
    debug_out: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    params: ParamArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Global,
    Adaptive,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Mean,
    Gaussian,
}

#[derive(Args)]
struct ParamArgs {
    /// Binarization mode
    #[arg(long, value_enum, default_value = "adaptive")]
    mode: Mode,

    /// Global cutoff (global mode)
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Local statistic (adaptive mode)
    #[arg(long, value_enum, default_value = "gaussian")]
    method: Method,

    /// Odd neighbourhood size (adaptive mode)
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_BLOCK_SIZE)]
    block_size: u32,

    /// Offset subtracted from the local statistic (adaptive mode)
    #[arg(
        long,
        default_value_t = PipelineConfig::DEFAULT_SUBTRACT_CONSTANT,
        allow_negative_numbers = true
    )]
    subtract: f64,

    /// Drop contours whose area is at or below this value
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_MIN_CONTOUR_AREA)]
    min_area: f64,

    /// Keep only the N largest contours
    #[arg(long, value_name = "N")]
    max_displayed: Option<usize>,
}

impl ParamArgs {
    fn to_config(&self) -> PipelineConfig {
        let binarization = match self.mode {
            Mode::Global => Binarization::Global {
                threshold: self.threshold,
            },
            Mode::Adaptive => Binarization::Adaptive {
                method: match self.method {
                    Method::Mean => AdaptiveMethod::Mean,
                    Method::Gaussian => AdaptiveMethod::Gaussian,
                },
                block_size: self.block_size,
                subtract_constant: self.subtract,
            },
        };

        PipelineConfig {
            binarization,
            min_contour_area: self.min_area,
            max_displayed: self.max_displayed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = args.params.to_config();
    config.validate()?;

    let Some(image_path) = args.image_path else {
        return open_window(config);
    };

    if !loader::has_supported_extension(&image_path) {
        log::warn!(
            "{} is not a {} file; trying to decode anyway",
            image_path.display(),
            loader::SUPPORTED_EXTENSIONS.join("/")
        );
    }

    log::info!("Loading image: {}", image_path.display());
    let img = loader::load_image(&image_path)?;
    log::info!("Image loaded: {}x{}", img.width(), img.height());

    // Stage-by-stage dump through the step pipeline
    if let Some(debug_dir) = &args.debug_out {
        let pipeline =
            build_standard_pipeline(&config, args.verbose).with_debug(debug_dir.clone())?;
        let items = pipeline.run(img.clone())?;
        log::info!("Debug pipeline produced {} objects", items.len());
    }

    let analysis = ContourAnalyzer::new(config).analyze(&img)?;

    if let Some(debug_dir) = &args.debug_out {
        Figure::render(&analysis).save_panels(&debug_dir.join("figure"))?;
    }

    let report = AnalysisReport::from_analysis(&analysis);
    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

#[cfg(feature = "gui")]
fn open_window(config: PipelineConfig) -> anyhow::Result<()> {
    geomprops::gui::run(config).map_err(|e| anyhow::anyhow!("Window failed: {}", e))
}

#[cfg(not(feature = "gui"))]
fn open_window(_config: PipelineConfig) -> anyhow::Result<()> {
    anyhow::bail!("No image given and this build has no viewer window (enable the `gui` feature)")
}
