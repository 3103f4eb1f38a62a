use std::{
    error::Error,
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use unreel::{
    AnimatedImage, AnimationInfo, DEFAULT_BASE_DIRECTORY, ExtractOptions, Extraction,
    OperationType, PngCompression, ProgressCallback, ProgressInfo, UnreelError,
};

const CLI_AFTER_HELP: &str = "Examples:\n  unreel extract spinner.gif\n  unreel extract spinner.gif --base-dir out --progress\n  unreel info spinner.gif --json\n  unreel count spinner.gif\n  unreel completions zsh > _unreel";

const NOT_FOUND_MESSAGE: &str = "File not found. Please check the file path.";

#[derive(Debug, Parser)]
#[command(
    name = "unreel",
    version,
    about = "Extract every frame of an animated image as a PNG",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show debug logging output.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar instead of one line per frame.
    #[arg(long)]
    progress: bool,

    /// PNG compression level (fast, default, best).
    #[arg(long)]
    compression: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract every frame into a timestamped directory.
    #[command(
        about = "Extract all frames",
        after_help = "Examples:\n  unreel extract spinner.gif\n  unreel extract spinner.gif --base-dir out"
    )]
    Extract {
        /// Input image path. Leaving it empty exits without doing anything.
        input: Option<String>,

        /// Directory under which gif_frames_<timestamp> is created.
        #[arg(long, default_value = DEFAULT_BASE_DIRECTORY)]
        base_dir: PathBuf,
    },

    /// Print metadata for an image file.
    #[command(
        about = "Print image metadata",
        visible_alias = "probe",
        after_help = "Examples:\n  unreel info spinner.gif\n  unreel info spinner.gif --json"
    )]
    Info {
        /// Input image path.
        input: String,

        /// Output metadata as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the number of frames in an image file.
    #[command(about = "Count frames")]
    Count {
        /// Input image path.
        input: String,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_compression(value: &str) -> Option<PngCompression> {
    match value.to_ascii_lowercase().as_str() {
        "fast" | "fastest" => Some(PngCompression::Fast),
        "default" | "balanced" => Some(PngCompression::Default),
        "best" | "small" | "smallest" => Some(PngCompression::Best),
        _ => None,
    }
}

/// The path to work on, or `None` when nothing was selected.
fn selected_input(input: Option<&str>) -> Option<PathBuf> {
    input
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// The single message shown for a failed run.
fn failure_message(error: &(dyn Error + 'static)) -> String {
    let not_found = error
        .downcast_ref::<UnreelError>()
        .is_some_and(UnreelError::is_not_found);
    if not_found {
        NOT_FOUND_MESSAGE.to_string()
    } else {
        format!("An error occurred:\n{error}")
    }
}

/// Metadata and frame count from a single open of `input`.
fn inspect(input: &Path) -> Result<(AnimationInfo, u64), UnreelError> {
    let mut image = AnimatedImage::open(input)?;
    let info = image.info().clone();
    let frame_count = image.count_frames()?;
    Ok((info, frame_count))
}

fn init_logging(global: &GlobalOptions) {
    let default_filter = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn base_extract_options(
    global: &GlobalOptions,
    base_dir: &Path,
    progress: Arc<TerminalProgress>,
) -> Result<ExtractOptions, Box<dyn Error>> {
    let mut options = ExtractOptions::new()
        .with_base_directory(base_dir)
        .with_progress(progress);

    if let Some(compression_str) = &global.compression {
        let compression = parse_compression(compression_str)
            .ok_or(format!("unsupported --compression: {compression_str}"))?;
        options = options.with_compression(compression);
    }

    Ok(options)
}

/// Renders export progress as one line per frame, or as a bar.
struct TerminalProgress {
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    fn new(show_bar: bool) -> Result<Self, Box<dyn Error>> {
        let bar = if show_bar {
            let pb = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}",
            )?;
            pb.set_style(style.progress_chars("##-"));
            Some(pb)
        } else {
            None
        };
        Ok(Self { bar })
    }

    fn finish(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_with_message("done");
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if info.operation != OperationType::FrameExport {
            return;
        }

        match &self.bar {
            Some(pb) => {
                if let Some(total) = info.total {
                    pb.set_length(total);
                }
                pb.set_position(info.current);
                if let Some(file_name) = &info.file_name {
                    pb.set_message(file_name.clone());
                }
            }
            None => {
                if let (Some(percentage), Some(file_name)) = (info.percentage, &info.file_name) {
                    println!("Progress: {percentage:.1}% - Saved {file_name}");
                }
            }
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Extract { input, base_dir } => {
            let Some(input) = selected_input(input.as_deref()) else {
                println!("No file selected. Exiting...");
                return Ok(());
            };

            let progress = Arc::new(TerminalProgress::new(cli.global.progress)?);
            let options = base_extract_options(&cli.global, &base_dir, progress.clone())?;
            let extraction = Extraction::prepare(&input, options)?;

            println!("\nImage Information:");
            println!("{}", extraction.info());
            println!(
                "Output directory: {}\n",
                extraction.output_directory().display()
            );

            let result = extraction.run();
            progress.finish();
            let report = result?;

            println!("\nExtraction Complete!");
            println!("Total frames extracted: {}", report.total_frames);
            println!(
                "Processing time: {:.2} seconds",
                report.elapsed.as_secs_f64()
            );
            println!(
                "Average time per frame: {:.3} seconds",
                report.average_per_frame().as_secs_f64()
            );
            println!("Files saved to: {}", report.output_directory.display());

            println!(
                "{} {}",
                "success:".green().bold(),
                format!(
                    "Successfully extracted {} frames\nSaved to: {}",
                    report.total_frames,
                    report.output_directory.display()
                )
                .green()
            );
        }
        Commands::Info { input, json } => {
            let (info, frame_count) = inspect(Path::new(&input))?;
            if json {
                let payload = json!({
                    "format": info.format_name(),
                    "width": info.width,
                    "height": info.height,
                    "color_type": info.color_mode(),
                    "animated": info.animated,
                    "frame_count": frame_count,
                    "file_name": info.file_name,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{info}");
                println!("Frames: {frame_count}");
            }
        }
        Commands::Count { input } => {
            println!("{}", unreel::count_frames(&input)?);
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "unreel", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {}", "error:".red().bold(), failure_message(error.as_ref()));
        std::process::exit(1);
    }
}
