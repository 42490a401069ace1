//! yolo2coco: turn a directory of YOLO label files into one COCO file.
//!
//! Each `<stem>.txt` label file in the label directory is paired with the
//! image `<stem>.jpg` in the image directory. The image header supplies the
//! pixel dimensions used to turn normalized center/size boxes into absolute
//! corner/size boxes. Images, annotations and a fixed set of placeholder
//! categories are collected into a single document written as COCO JSON.
//!
//! # Modules
//!
//! - [`ir`]: COCO records, box types, and YOLO/COCO file I/O
//! - [`conversion`]: The conversion pass and its report
//! - [`error`]: Error types for yolo2coco operations

pub mod conversion;
pub mod error;
pub mod ir;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use conversion::{convert_dir, convert_to_file, ConvertOptions};
pub use error::Yolo2CocoError;
pub use ir::io_yolo::DiscoveryOrder;

/// The yolo2coco CLI application.
#[derive(Parser)]
#[command(name = "yolo2coco")]
#[command(version, author, about)]
struct Cli {
    /// Directory holding the YOLO `.txt` label files.
    #[arg(long, env = "YOLO2COCO_LABELS_DIR", default_value = "labels")]
    labels_dir: PathBuf,

    /// Directory holding the images named after the label files.
    #[arg(long, env = "YOLO2COCO_IMAGES_DIR", default_value = "images")]
    images_dir: PathBuf,

    /// COCO JSON file to write (overwritten if it exists).
    #[arg(short, long, env = "YOLO2COCO_OUTPUT", default_value = "output_coco.json")]
    output: PathBuf,

    /// Suffix appended to a label's stem to find its image.
    #[arg(long, env = "YOLO2COCO_IMAGE_SUFFIX", default_value = ".jpg")]
    image_suffix: String,

    /// Number of placeholder categories (ids 0..N) to emit.
    #[arg(
        long,
        env = "YOLO2COCO_NUM_CATEGORIES",
        default_value_t = conversion::DEFAULT_NUM_CATEGORIES
    )]
    num_categories: u64,

    /// Process label files sorted by name instead of directory listing order.
    #[arg(long)]
    sorted: bool,

    /// Output format for the conversion report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

/// How the conversion report is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            labels_dir: self.labels_dir.clone(),
            images_dir: self.images_dir.clone(),
            output_path: self.output.clone(),
            image_suffix: self.image_suffix.clone(),
            num_categories: self.num_categories,
            order: if self.sorted {
                DiscoveryOrder::Sorted
            } else {
                DiscoveryOrder::Listing
            },
        }
    }
}

/// Run the yolo2coco CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Yolo2CocoError> {
    let cli = Cli::parse();

    // A logger may already be installed when embedded; that one wins.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let opts = cli.convert_options();
    log::info!(
        "converting labels from {} (images from {})",
        opts.labels_dir.display(),
        opts.images_dir.display()
    );

    let report = convert_to_file(&opts)?;

    match cli.report {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(|source| {
                Yolo2CocoError::OutputSerialize {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{json}");
            // stdout carries only the report here
            eprintln!(
                "Conversion complete! COCO annotations saved in {}",
                opts.output_path.display()
            );
        }
        ReportFormat::Text => {
            print!("{report}");
            println!(
                "Conversion complete! COCO annotations saved in {}",
                opts.output_path.display()
            );
        }
    }

    Ok(())
}
