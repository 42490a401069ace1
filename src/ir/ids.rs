//! Newtype ids for the records of a COCO document, and the counter that
//! hands them out.
//!
//! Image and annotation ids are 1-based and dense. Category ids come straight
//! from YOLO class indices and are therefore signed: nothing stops a label
//! file from carrying `-1`, and such values are passed through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Identifier of an image record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub u64);

impl ImageId {
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ImageId {
    fn from(id: u64) -> Self {
        ImageId::new(id)
    }
}

impl fmt::Debug for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageId({})", self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an annotation record, unique across the whole document.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(pub u64);

impl AnnotationId {
    #[inline]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for AnnotationId {
    fn from(id: u64) -> Self {
        AnnotationId::new(id)
    }
}

impl fmt::Debug for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationId({})", self.0)
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a category. Equal to the YOLO class index it came from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    #[inline]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns true if this id falls in the placeholder range `0..count`.
    #[inline]
    pub fn is_within(&self, count: u64) -> bool {
        u64::try_from(self.0).is_ok_and(|id| id < count)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        CategoryId::new(id)
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential id generator, starting at 1.
///
/// An id is consumed only by calling [`IdSequence::next_id`], so callers
/// that bail out before emitting a record leave no gap behind.
pub struct IdSequence<TId> {
    next: u64,
    _id: PhantomData<TId>,
}

impl<TId: From<u64>> IdSequence<TId> {
    pub fn new() -> Self {
        Self {
            next: 1,
            _id: PhantomData,
        }
    }

    /// Returns the next id and advances the sequence.
    pub fn next_id(&mut self) -> TId {
        let id = self.next;
        self.next += 1;
        TId::from(id)
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.next - 1
    }
}

impl<TId: From<u64>> Default for IdSequence<TId> {
    fn default() -> Self {
        Self::new()
    }
}

impl<TId> fmt::Debug for IdSequence<TId> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdSequence")
            .field("next", &self.next)
            .finish()
    }
}
