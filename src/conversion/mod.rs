//! The YOLO → COCO conversion pass.
//!
//! One call to [`convert_dir`] walks the label directory once, in discovery
//! order, and builds a [`CocoDocument`]:
//!
//! - label files whose image cannot be measured are skipped whole, without
//!   consuming an image or annotation id;
//! - every remaining label file yields one image record and one annotation
//!   per line;
//! - a malformed line aborts the run.
//!
//! [`convert_to_file`] additionally writes the document, which only happens
//! after every label file has been processed.

pub mod report;

pub use report::{
    ConversionCounts, ConversionIssue, ConversionIssueCode, ConversionReport, ConversionSeverity,
    SkippedLabel,
};

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Yolo2CocoError;
use crate::ir::io_coco_json::write_coco_json;
use crate::ir::io_yolo::{
    list_label_files, normalize_image_suffix, read_image_dimensions, read_label_file,
    DiscoveryOrder, LabelFile, YoloLabelRow, DEFAULT_IMAGE_SUFFIX,
};
use crate::ir::{
    AnnotationId, AnnotationRecord, CategoryId, CocoDocument, IdSequence, ImageId, ImageRecord,
};

/// Number of placeholder categories generated when none is configured.
pub const DEFAULT_NUM_CATEGORIES: u64 = 26;

/// Everything a conversion run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    pub labels_dir: PathBuf,
    pub images_dir: PathBuf,
    pub output_path: PathBuf,
    /// Appended to a label's stem to find its image, e.g. `.jpg`.
    pub image_suffix: String,
    /// Categories `0..num_categories` are emitted regardless of usage.
    pub num_categories: u64,
    pub order: DiscoveryOrder,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            labels_dir: PathBuf::from("labels"),
            images_dir: PathBuf::from("images"),
            output_path: PathBuf::from("output_coco.json"),
            image_suffix: DEFAULT_IMAGE_SUFFIX.to_string(),
            num_categories: DEFAULT_NUM_CATEGORIES,
            order: DiscoveryOrder::Listing,
        }
    }
}

/// The in-memory result of a run.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub document: CocoDocument,
    pub report: ConversionReport,
}

/// Converts the label directory described by `opts` without writing output.
pub fn convert_dir(opts: &ConvertOptions) -> Result<Conversion, Yolo2CocoError> {
    let image_suffix = normalize_image_suffix(&opts.image_suffix);
    let label_files = list_label_files(&opts.labels_dir, opts.order)?;
    log::info!(
        "found {} label file(s) in {}",
        label_files.len(),
        opts.labels_dir.display()
    );

    let mut converter = Converter::new(opts);
    converter.report.counts.label_files = label_files.len();

    for label in &label_files {
        converter.process_label_file(label, &image_suffix)?;
    }

    Ok(converter.finish())
}

/// Converts and writes the document to `opts.output_path`.
pub fn convert_to_file(opts: &ConvertOptions) -> Result<ConversionReport, Yolo2CocoError> {
    let Conversion {
        document,
        mut report,
    } = convert_dir(opts)?;

    write_coco_json(&opts.output_path, &document)?;
    report.output = Some(opts.output_path.display().to_string());
    log::info!("wrote {}", opts.output_path.display());

    Ok(report)
}

/// Accumulates records for one run. Owns both id counters, so ids are
/// scoped to the run and advance only when a record is actually pushed.
struct Converter<'a> {
    opts: &'a ConvertOptions,
    document: CocoDocument,
    image_ids: IdSequence<ImageId>,
    annotation_ids: IdSequence<AnnotationId>,
    report: ConversionReport,
}

impl<'a> Converter<'a> {
    fn new(opts: &'a ConvertOptions) -> Self {
        Self {
            opts,
            document: CocoDocument::with_placeholder_categories(opts.num_categories),
            image_ids: IdSequence::new(),
            annotation_ids: IdSequence::new(),
            report: ConversionReport::new(
                opts.labels_dir.display().to_string(),
                opts.images_dir.display().to_string(),
            ),
        }
    }

    fn process_label_file(
        &mut self,
        label: &LabelFile,
        image_suffix: &str,
    ) -> Result<(), Yolo2CocoError> {
        let image_file_name = label.image_file_name(image_suffix);
        let image_path = self.opts.images_dir.join(&image_file_name);

        let (width, height) = match read_image_dimensions(&image_path) {
            Ok(dims) => dims,
            Err(err) if err.is_image_error() => {
                log::debug!("skipping {}: {}", label.file_name, err);
                self.report.add_skipped(SkippedLabel {
                    label_file: label.file_name.clone(),
                    image_path: image_path.display().to_string(),
                    reason: err.to_string(),
                });
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        let image_id = self.image_ids.next_id();
        self.document
            .images
            .push(ImageRecord::new(image_id, image_file_name, width, height));

        let rows = read_label_file(&label.path)?;
        log::debug!(
            "image {} ({}x{}) from {}: {} box(es)",
            image_id,
            width,
            height,
            label.file_name,
            rows.len()
        );

        for row in rows {
            self.push_annotation(image_id, width, height, row);
        }

        Ok(())
    }

    fn push_annotation(&mut self, image_id: ImageId, width: u32, height: u32, row: YoloLabelRow) {
        let bbox = row.bbox.to_pixel(width, height);
        let id = self.annotation_ids.next_id();
        self.document
            .annotations
            .push(AnnotationRecord::new(id, image_id, row.class_id, bbox));
    }

    fn finish(mut self) -> Conversion {
        self.flag_out_of_range_categories();

        self.report.counts.images = self.document.images.len();
        self.report.counts.annotations = self.document.annotations.len();
        self.report.counts.categories = self.document.categories.len();

        log::info!(
            "converted {} image(s) and {} annotation(s); skipped {} label file(s)",
            self.image_ids.issued(),
            self.annotation_ids.issued(),
            self.report.skipped.len()
        );

        Conversion {
            document: self.document,
            report: self.report,
        }
    }

    /// Category ids are passed through unchecked; this only reports the
    /// ones that have no category record.
    fn flag_out_of_range_categories(&mut self) {
        let mut out_of_range: BTreeMap<CategoryId, usize> = BTreeMap::new();
        for ann in &self.document.annotations {
            if !ann.category_id.is_within(self.opts.num_categories) {
                *out_of_range.entry(ann.category_id).or_default() += 1;
            }
        }

        for (category_id, count) in out_of_range {
            log::warn!(
                "category id {} is used by {} annotation(s) but only categories 0..{} exist",
                category_id,
                count,
                self.opts.num_categories
            );
            self.report.add(ConversionIssue::warning(
                ConversionIssueCode::CategoryOutOfRange,
                format!(
                    "category id {} is used by {} annotation(s) but has no category record",
                    category_id, count
                ),
            ));
        }
    }
}
