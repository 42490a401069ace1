//! Bounding box types on both sides of the conversion.
//!
//! YOLO labels carry [`NormalizedCxCyWh`] boxes (center and size as fractions
//! of the image). COCO annotations carry [`PixelXYWH`] boxes (top-left corner
//! and size in whole pixels).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A box expressed as center/size fractions of the image dimensions.
///
/// Values are nominally in `[0, 1]` but nothing enforces it; boxes that
/// stick out of the image are converted like any other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedCxCyWh {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedCxCyWh {
    #[inline]
    pub fn new(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self { cx, cy, w, h }
    }

    /// Returns true if all four values are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Converts to an absolute pixel box for an image of the given size.
    ///
    /// Every component is truncated toward zero, not floored: a box whose
    /// left edge lands at `-2.5` gets `x = -2`. Values beyond the `i64`
    /// range saturate.
    pub fn to_pixel(&self, image_width: u32, image_height: u32) -> PixelXYWH {
        let img_w = image_width as f64;
        let img_h = image_height as f64;

        PixelXYWH {
            x: ((self.cx - self.w / 2.0) * img_w) as i64,
            y: ((self.cy - self.h / 2.0) * img_h) as i64,
            width: (self.w * img_w) as i64,
            height: (self.h * img_h) as i64,
        }
    }
}

/// A box expressed as top-left corner plus width and height, in pixels.
///
/// Serializes as the COCO array `[x, y, width, height]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelXYWH {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelXYWH {
    #[inline]
    pub fn from_xywh(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `width * height`, saturating on overflow.
    ///
    /// Only negative when one of the sides is negative.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }

    #[inline]
    pub fn to_array(&self) -> [i64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl From<[i64; 4]> for PixelXYWH {
    fn from([x, y, width, height]: [i64; 4]) -> Self {
        Self::from_xywh(x, y, width, height)
    }
}

impl Serialize for PixelXYWH {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PixelXYWH {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <[i64; 4]>::deserialize(deserializer).map(PixelXYWH::from)
    }
}
