#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use yolo2coco::{ConvertOptions, DiscoveryOrder};

/// A minimal 24-bit BMP. Image probing goes by header bytes, so these can be
/// saved under a `.jpg` name.
pub fn bmp_bytes(width: u32, height: u32) -> Vec<u8> {
    let row_stride = (width * 3).div_ceil(4) * 4;
    let pixel_array_size = row_stride * height;
    let file_size = 54 + pixel_array_size;

    let mut bytes = Vec::with_capacity(file_size as usize);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&file_size.to_le_bytes());
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&(width as i32).to_le_bytes());
    bytes.extend_from_slice(&(height as i32).to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&pixel_array_size.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.resize(file_size as usize, 0);
    bytes
}

/// A PNG signature and IHDR chunk with no image data after it. The header
/// reports `width`x`height` but the file cannot be decoded.
pub fn png_header_only(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 2, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

pub fn write_bmp(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, bmp_bytes(width, height)).expect("write bmp file");
}

/// Scratch `labels/` + `images/` layout under a temp dir.
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new(root: &Path) -> Self {
        fs::create_dir_all(root.join("labels")).expect("create labels dir");
        fs::create_dir_all(root.join("images")).expect("create images dir");
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn labels_dir(&self) -> PathBuf {
        self.root.join("labels")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("images")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join("output_coco.json")
    }

    pub fn label(&self, stem: &str, contents: &str) -> &Self {
        fs::write(self.labels_dir().join(format!("{stem}.txt")), contents)
            .expect("write label file");
        self
    }

    pub fn image(&self, stem: &str, width: u32, height: u32) -> &Self {
        write_bmp(&self.images_dir().join(format!("{stem}.jpg")), width, height);
        self
    }

    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            labels_dir: self.labels_dir(),
            images_dir: self.images_dir(),
            output_path: self.output_path(),
            order: DiscoveryOrder::Sorted,
            ..Default::default()
        }
    }
}
