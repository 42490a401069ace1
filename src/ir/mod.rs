//! Annotation records on both sides of the conversion.
//!
//! YOLO labels are read into [`io_yolo::YoloLabelRow`] values holding a
//! [`NormalizedCxCyWh`] box. Each row becomes an [`AnnotationRecord`] with an
//! integer [`PixelXYWH`] box inside a [`CocoDocument`], which
//! [`io_coco_json`] writes out.
//!
//! # Example
//!
//! ```
//! use yolo2coco::ir::{AnnotationRecord, CocoDocument, ImageRecord, NormalizedCxCyWh};
//!
//! let mut document = CocoDocument::with_placeholder_categories(26);
//! document.images.push(ImageRecord::new(1u64, "image.jpg", 100, 200));
//!
//! let bbox = NormalizedCxCyWh::new(0.5, 0.5, 0.2, 0.4).to_pixel(100, 200);
//! document.annotations.push(AnnotationRecord::new(1u64, 1u64, 0i64, bbox));
//!
//! assert_eq!(document.annotations[0].bbox.to_array(), [40, 60, 20, 80]);
//! assert_eq!(document.annotations[0].area, 1600);
//! ```

mod bbox;
mod ids;
pub mod io_coco_json;
pub mod io_yolo;
mod model;

// Re-export core types for convenient access
pub use bbox::{NormalizedCxCyWh, PixelXYWH};
pub use ids::{AnnotationId, CategoryId, IdSequence, ImageId};
pub use model::{
    placeholder_categories, AnnotationRecord, CategoryRecord, CocoDocument, ImageRecord,
    PLACEHOLDER_CATEGORY_PREFIX,
};
