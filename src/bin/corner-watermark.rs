use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};

use corner_watermark::{
    default_output_dir, Corner, ProcessOptions, ProcessResult, WatermarkEngine, DEFAULT_CUTOFF,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CornerSet {
    /// All four corners
    All,
    /// Upper-left and upper-right
    Top,
    /// Lower-left and lower-right
    Bottom,
    /// Upper-left and lower-left
    Left,
    /// Upper-right and lower-right
    Right,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl CornerSet {
    fn corners(self) -> Vec<Corner> {
        match self {
            CornerSet::All => Corner::ALL.to_vec(),
            CornerSet::Top => vec![Corner::UpperLeft, Corner::UpperRight],
            CornerSet::Bottom => vec![Corner::LowerLeft, Corner::LowerRight],
            CornerSet::Left => vec![Corner::UpperLeft, Corner::LowerLeft],
            CornerSet::Right => vec![Corner::UpperRight, Corner::LowerRight],
            CornerSet::UpperLeft => vec![Corner::UpperLeft],
            CornerSet::UpperRight => vec![Corner::UpperRight],
            CornerSet::LowerLeft => vec![Corner::LowerLeft],
            CornerSet::LowerRight => vec![Corner::LowerRight],
        }
    }
}

#[derive(Parser)]
#[command(
    name = "corner-watermark",
    about = "Add a watermark to each photo in a folder, in the least busy corner",
    version,
    after_help = "Watermarked copies land in a 'with-watermark' subdirectory by default;\n\
                  originals are never modified. Supports .jpg/.jpeg photos and .png watermarks."
)]
struct Cli {
    /// Folder with photos to watermark
    folder: String,

    /// Output directory (default: {folder}/with-watermark)
    #[arg(short, long)]
    output: Option<String>,

    /// Max watermark to image width ratio (0.0-1.0)
    #[arg(long, default_value = "0.15")]
    width: f32,

    /// Max watermark to image height ratio (0.0-1.0)
    #[arg(long, default_value = "0.15")]
    height: f32,

    /// Watermark opacity (0.0 transparent, 1.0 opaque)
    #[arg(long, default_value = "0.5")]
    opacity: f32,

    /// Corner brightness above which the dark variant is used (0-255)
    #[arg(long, default_value_t = DEFAULT_CUTOFF)]
    cutoff: u8,

    /// Corners the placement may choose from
    #[arg(short, long, value_enum, default_value = "all")]
    corners: CornerSet,

    /// Custom light watermark PNG (default: embedded)
    #[arg(long)]
    light_watermark: Option<PathBuf>,

    /// Custom dark watermark PNG (default: embedded)
    #[arg(long)]
    dark_watermark: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    // Per-file status goes through print_result; library logs only
    // surface with --verbose.
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Error
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let folder = Path::new(&cli.folder);
    if !folder.exists() {
        eprintln!("Error: {} does not exist", cli.folder);
        process::exit(1);
    }
    if !folder.is_dir() {
        eprintln!("Error: {} is not a directory", cli.folder);
        process::exit(1);
    }

    let engine = match (&cli.light_watermark, &cli.dark_watermark) {
        (None, None) => WatermarkEngine::new(),
        (light, dark) => {
            // Custom marks must come in pairs so both variants stay consistent.
            let (Some(light), Some(dark)) = (light, dark) else {
                eprintln!("Error: --light-watermark and --dark-watermark must be given together");
                process::exit(1);
            };
            WatermarkEngine::with_watermarks(light, dark)
        }
    };
    let engine = match engine {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Fatal: Failed to load watermarks: {e}");
            process::exit(1);
        }
    };

    let opts = ProcessOptions {
        width_proportion: cli.width,
        height_proportion: cli.height,
        opacity: cli.opacity,
        cutoff_color: cli.cutoff,
        corners: cli.corners.corners(),
    };
    if let Err(e) = opts.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let output_dir = cli
        .output
        .as_ref()
        .map_or_else(|| default_output_dir(folder), PathBuf::from);

    if !cli.quiet {
        eprintln!(
            "Adding watermarks to photos in {} (output: {})",
            folder.display(),
            output_dir.display()
        );
        eprintln!();
    }

    let results = engine.process_directory(folder, &output_dir, &opts);

    let mut success_count = 0u32;
    let mut skip_count = 0u32;
    let mut fail_count = 0u32;

    for r in &results {
        print_result(r, cli.quiet, cli.verbose);
        if r.skipped {
            skip_count += 1;
        } else if r.success {
            success_count += 1;
        } else {
            fail_count += 1;
        }
    }

    if !cli.quiet {
        eprintln!();
        eprint!("[Summary] Watermarked: {success_count}");
        if skip_count > 0 {
            eprint!(", Skipped: {skip_count}");
        }
        if fail_count > 0 {
            eprint!(", Failed: {fail_count}");
        }
        eprintln!(" (Total: {})", results.len());
    }

    if fail_count > 0 {
        process::exit(1);
    }
}

fn print_result(result: &ProcessResult, quiet: bool, verbose: bool) {
    if quiet && result.success {
        return;
    }

    let filename = result.path.file_name().map_or_else(
        || result.path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );

    if result.skipped {
        if !quiet {
            eprintln!("[SKIP] {filename}: {}", result.message);
        }
    } else if result.success {
        if !quiet {
            match (result.corner, result.variant) {
                (Some(corner), Some(variant)) => {
                    eprintln!("[OK] {filename} ({variant} mark, {corner} corner)");
                }
                _ => eprintln!("[OK] {filename}"),
            }
        }
    } else {
        eprintln!("[FAIL] {filename}: {}", result.message);
    }

    if verbose && !result.message.is_empty() {
        eprintln!("  -> {}", result.message);
    }
}
