//! COCO document model.
//!
//! Field declaration order is the serialization order, so the structs below
//! are laid out exactly as records appear in the output file.

use serde::{Deserialize, Serialize};

use super::bbox::PixelXYWH;
use super::ids::{AnnotationId, CategoryId, ImageId};

/// Prefix of the generated placeholder category names (`category_0`, ...).
pub const PLACEHOLDER_CATEGORY_PREFIX: &str = "category_";

/// The aggregated output: every image, annotation and category of a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CocoDocument {
    pub images: Vec<ImageRecord>,
    pub annotations: Vec<AnnotationRecord>,
    pub categories: Vec<CategoryRecord>,
}

impl CocoDocument {
    /// Creates an empty document holding `count` placeholder categories.
    pub fn with_placeholder_categories(count: u64) -> Self {
        Self {
            images: Vec::new(),
            annotations: Vec::new(),
            categories: placeholder_categories(count),
        }
    }
}

/// An image that was found and measured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: ImageId,

    /// Image file name relative to the image directory.
    pub file_name: String,

    /// Width in pixels, never zero.
    pub width: u32,

    /// Height in pixels, never zero.
    pub height: u32,
}

impl ImageRecord {
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width,
            height,
        }
    }
}

/// One bounding box converted from one label line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub id: AnnotationId,
    pub image_id: ImageId,

    /// The YOLO class index, unchecked against the category list.
    pub category_id: CategoryId,

    /// `[x_min, y_min, width, height]` in pixels.
    pub bbox: PixelXYWH,

    pub area: i64,

    /// Always 0; crowd regions are not produced.
    pub iscrowd: u8,
}

impl AnnotationRecord {
    /// Creates an annotation, deriving `area` from the box.
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: PixelXYWH,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            area: bbox.area(),
            bbox,
            iscrowd: 0,
        }
    }
}

/// A category entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    pub name: String,
}

impl CategoryRecord {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// A category named `category_<id>`.
    pub fn placeholder(id: i64) -> Self {
        Self::new(id, format!("{PLACEHOLDER_CATEGORY_PREFIX}{id}"))
    }
}

/// Generates categories `0..count` with placeholder names.
pub fn placeholder_categories(count: u64) -> Vec<CategoryRecord> {
    (0..count)
        .map(|id| CategoryRecord::placeholder(id as i64))
        .collect()
}
