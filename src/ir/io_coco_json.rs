//! COCO JSON writer (and reader, for checking output).
//!
//! COCO bounding boxes use `[x, y, width, height]` where `(x, y)` is the
//! top-left corner in absolute pixel coordinates.
//!
//! Output is pretty-printed with a four space indent. Keys appear in struct
//! declaration order: `images`, `annotations`, `categories` at the top level.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::model::CocoDocument;
use crate::error::Yolo2CocoError;

/// Indentation used for the output document.
pub const JSON_INDENT: &[u8] = b"    ";

/// Writes a document to a COCO JSON file, replacing any existing file.
///
/// The document is written to a temporary file next to `path` and renamed
/// over it once complete, so a failed write leaves any previous output intact.
pub fn write_coco_json(path: &Path, document: &CocoDocument) -> Result<(), Yolo2CocoError> {
    let write_error = |source| Yolo2CocoError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".yolo2coco-").suffix(".json.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let temp = builder.tempfile_in(dir).map_err(write_error)?;
    let mut writer = BufWriter::new(temp);

    serialize_pretty(&mut writer, document).map_err(|source| {
        if source.is_io() {
            write_error(source.into())
        } else {
            Yolo2CocoError::OutputSerialize {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let temp = writer
        .into_inner()
        .map_err(|err| write_error(err.into_error()))?;
    temp.persist(path).map_err(|err| write_error(err.error))?;

    Ok(())
}

/// Reads a COCO JSON file written by [`write_coco_json`].
pub fn read_coco_json(path: &Path) -> Result<CocoDocument, Yolo2CocoError> {
    let file = File::open(path).map_err(|source| Yolo2CocoError::CocoJsonRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        Yolo2CocoError::CocoJsonParse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Writes a document to a COCO JSON string, formatted as on disk.
pub fn to_coco_string(document: &CocoDocument) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    serialize_pretty(&mut buf, document)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Reads a document from a COCO JSON string.
pub fn from_coco_str(json: &str) -> Result<CocoDocument, serde_json::Error> {
    serde_json::from_str(json)
}

fn serialize_pretty<W: Write>(
    writer: W,
    document: &CocoDocument,
) -> Result<(), serde_json::Error> {
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    document.serialize(&mut serializer)
}
