use std::path::PathBuf;
use thiserror::Error;

/// The main error type for yolo2coco operations.
///
/// Image failures (`ImageDimensionRead`, `ImageEmpty`, `ImageDecode`) are
/// recovered by the converter, which skips the affected label file. Every other variant aborts
/// the run.
#[derive(Debug, Error)]
pub enum Yolo2CocoError {
    #[error("Failed to list label directory {path}: {source}")]
    LabelDirRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read label file {path}: {source}")]
    LabelRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid label line in {path} at line {line}: {message}")]
    LabelParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image {path} has no pixels ({width}x{height})")]
    ImageEmpty {
        path: PathBuf,
        width: usize,
        height: usize,
    },

    #[error("Failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize COCO JSON to {path}: {source}")]
    OutputSerialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to open COCO JSON {path}: {source}")]
    CocoJsonRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Yolo2CocoError {
    /// Returns true for failures to load an image or obtain its dimensions.
    pub fn is_image_error(&self) -> bool {
        matches!(
            self,
            Yolo2CocoError::ImageDimensionRead { .. }
                | Yolo2CocoError::ImageEmpty { .. }
                | Yolo2CocoError::ImageDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_errors_are_distinguished_from_fatal_ones() {
        let empty = Yolo2CocoError::ImageEmpty {
            path: PathBuf::from("images/a.jpg"),
            width: 0,
            height: 12,
        };
        assert!(empty.is_image_error());

        let decode = Yolo2CocoError::ImageDecode {
            path: PathBuf::from("images/a.jpg"),
            source: image::ImageError::IoError(std::io::ErrorKind::UnexpectedEof.into()),
        };
        assert!(decode.is_image_error());

        let parse = Yolo2CocoError::LabelParse {
            path: PathBuf::from("labels/a.txt"),
            line: 3,
            message: "expected 5 tokens, found 4".to_string(),
        };
        assert!(!parse.is_image_error());
        assert_eq!(
            parse.to_string(),
            "Invalid label line in labels/a.txt at line 3: expected 5 tokens, found 4"
        );
    }
}
