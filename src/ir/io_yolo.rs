//! YOLO label-directory reader.
//!
//! Handles a flat `labels/` directory of `<stem>.txt` files paired with a flat
//! image directory of `<stem><image suffix>` files. Image headers give the
//! pixel dimensions; each image is also decoded once so that files with a
//! valid header but broken pixel data are treated as unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::bbox::NormalizedCxCyWh;
use super::ids::CategoryId;
use crate::error::Yolo2CocoError;

/// Suffix identifying label files.
pub const LABEL_SUFFIX: &str = ".txt";

/// Image suffix used when none is configured.
pub const DEFAULT_IMAGE_SUFFIX: &str = ".jpg";

/// Order in which label files are processed, and therefore numbered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscoveryOrder {
    /// Whatever order the filesystem lists entries in.
    #[default]
    Listing,
    /// Sorted by file name.
    Sorted,
}

/// A label file found in the label directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelFile {
    pub path: PathBuf,
    /// File name including the `.txt` suffix.
    pub file_name: String,
}

impl LabelFile {
    /// File name without the label suffix.
    pub fn stem(&self) -> &str {
        self.file_name
            .strip_suffix(LABEL_SUFFIX)
            .unwrap_or(&self.file_name)
    }

    /// Name of the image this label belongs to.
    pub fn image_file_name(&self, image_suffix: &str) -> String {
        format!("{}{}", self.stem(), image_suffix)
    }
}

/// One parsed label line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YoloLabelRow {
    pub class_id: CategoryId,
    pub bbox: NormalizedCxCyWh,
}

/// Lists the label files directly inside `dir`.
///
/// Subdirectories are not descended into, and entries that are not regular
/// files or do not end in `.txt` are ignored.
pub fn list_label_files(
    dir: &Path,
    order: DiscoveryOrder,
) -> Result<Vec<LabelFile>, Yolo2CocoError> {
    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
    if order == DiscoveryOrder::Sorted {
        walker = walker.sort_by_file_name();
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| Yolo2CocoError::LabelDirRead {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::debug!("ignoring non UTF-8 file name {}", entry.path().display());
            continue;
        };

        if file_name.ends_with(LABEL_SUFFIX) {
            files.push(LabelFile {
                path: entry.path().to_path_buf(),
                file_name: file_name.to_string(),
            });
        }
    }

    Ok(files)
}

/// Normalizes a configured image suffix so that `jpg` and `.jpg` agree.
pub fn normalize_image_suffix(raw: &str) -> String {
    if raw.is_empty() || raw.starts_with('.') {
        raw.to_string()
    } else {
        format!(".{raw}")
    }
}

/// Reads the pixel dimensions of an image and checks that it decodes.
///
/// Images reporting a zero width or height are rejected before any pixel
/// data is read.
pub fn read_image_dimensions(path: &Path) -> Result<(u32, u32), Yolo2CocoError> {
    let size = imagesize::size(path).map_err(|source| Yolo2CocoError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let empty = || Yolo2CocoError::ImageEmpty {
        path: path.to_path_buf(),
        width: size.width,
        height: size.height,
    };

    if size.width == 0 || size.height == 0 {
        return Err(empty());
    }

    let width = u32::try_from(size.width).map_err(|_| empty())?;
    let height = u32::try_from(size.height).map_err(|_| empty())?;

    decode_image(path)?;

    Ok((width, height))
}

fn decode_image(path: &Path) -> Result<(), Yolo2CocoError> {
    let decode_error = |source: image::ImageError| Yolo2CocoError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| decode_error(err.into()))?
        .decode()
        .map_err(decode_error)?;

    Ok(())
}

/// Reads and parses every line of a label file.
pub fn read_label_file(path: &Path) -> Result<Vec<YoloLabelRow>, Yolo2CocoError> {
    let content = fs::read_to_string(path).map_err(|source| Yolo2CocoError::LabelRead {
        path: path.to_path_buf(),
        source,
    })?;
    from_yolo_label_str(&content, path)
}

/// Parses label file contents. `path` is only used in error messages.
///
/// Only the final line terminator is implicit; a blank line anywhere else is
/// a malformed row.
pub fn from_yolo_label_str(
    content: &str,
    path: &Path,
) -> Result<Vec<YoloLabelRow>, Yolo2CocoError> {
    let mut rows = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        rows.push(parse_label_line(line, path, line_idx + 1)?);
    }
    Ok(rows)
}

/// Parses a single `<class> <xc> <yc> <w> <h>` line.
///
/// The line must hold exactly five tokens: an integer class index followed
/// by four finite numbers.
pub fn parse_label_line(
    line: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<YoloLabelRow, Yolo2CocoError> {
    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = line.split_whitespace().take(6).collect();
    if tokens.len() != 5 {
        let found = if tokens.len() > 5 {
            "more than 5".to_string()
        } else {
            tokens.len().to_string()
        };
        return Err(Yolo2CocoError::LabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("expected 5 tokens, found {found}"),
        });
    }

    let class_id = tokens[0]
        .parse::<i64>()
        .map_err(|_| Yolo2CocoError::LabelParse {
            path: file_path.to_path_buf(),
            line: line_num,
            message: format!("invalid class_id '{}'; expected an integer", tokens[0]),
        })?;

    let bbox = NormalizedCxCyWh::new(
        parse_f64_token(tokens[1], "x_center", file_path, line_num)?,
        parse_f64_token(tokens[2], "y_center", file_path, line_num)?,
        parse_f64_token(tokens[3], "width", file_path, line_num)?,
        parse_f64_token(tokens[4], "height", file_path, line_num)?,
    );

    Ok(YoloLabelRow {
        class_id: CategoryId::new(class_id),
        bbox,
    })
}

fn parse_f64_token(
    raw: &str,
    field_name: &str,
    file_path: &Path,
    line_num: usize,
) -> Result<f64, Yolo2CocoError> {
    let parse_error = |message: String| Yolo2CocoError::LabelParse {
        path: file_path.to_path_buf(),
        line: line_num,
        message,
    };

    let value = raw.parse::<f64>().map_err(|_| {
        parse_error(format!(
            "invalid {field_name} '{raw}'; expected floating-point number"
        ))
    })?;

    // NaN and infinities have no pixel equivalent.
    if !value.is_finite() {
        return Err(parse_error(format!(
            "invalid {field_name} '{raw}'; expected a finite number"
        )));
    }

    Ok(value)
}
