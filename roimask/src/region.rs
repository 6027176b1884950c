use smallvec::smallvec;

use crate::error::{RegionError, ViewError};
use crate::image::{Coord, NdImage};

/// Axis-aligned bounding box: an integer offset and size per axis.
///
/// Immutable after construction. The offset locates the box in the
/// embedding image's coordinate space; the box covers
/// `[offset[d], offset[d] + size[d])` on each axis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    offset: Coord,
    size: Coord,
}

impl Region {
    /// Create a region from an offset and a size of equal rank.
    pub fn new(offset: &[i64], size: &[i64]) -> Result<Self, RegionError> {
        if offset.len() != size.len() {
            return Err(RegionError::RankMismatch {
                offset: offset.len(),
                size: size.len(),
            });
        }
        for (axis, &s) in size.iter().enumerate() {
            if s < 0 {
                return Err(RegionError::NegativeSize { axis, size: s });
            }
        }
        Ok(Self {
            offset: Coord::from_slice(offset),
            size: Coord::from_slice(size),
        })
    }

    /// Region covering the full extent of `dims`, anchored at the origin.
    pub fn full(dims: &[i64]) -> Self {
        assert!(dims.iter().all(|&d| d >= 0));
        Self {
            offset: smallvec![0; dims.len()],
            size: Coord::from_slice(dims),
        }
    }

    pub fn offset(&self) -> &[i64] {
        &self.offset
    }

    pub fn size(&self) -> &[i64] {
        &self.size
    }

    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Number of integer coordinates inside the box.
    pub fn num_elements(&self) -> u64 {
        self.size.iter().map(|&s| s as u64).product()
    }

    /// Whether `pos` (global coordinates) lies inside the box.
    pub fn contains(&self, pos: &[i64]) -> bool {
        pos.len() == self.ndim()
            && pos
                .iter()
                .zip(self.offset.iter().zip(&self.size))
                .all(|(&p, (&o, &s))| p >= o && p < o + s)
    }
}

/// Check that `region` has the rank of `dims` and lies inside its bounds.
pub(crate) fn check_fit(region: &Region, dims: &[i64]) -> Result<(), ViewError> {
    if region.ndim() != dims.len() {
        return Err(ViewError::RankMismatch {
            region: region.ndim(),
            image: dims.len(),
        });
    }
    for (axis, ((&o, &s), &d)) in region
        .offset
        .iter()
        .zip(&region.size)
        .zip(dims)
        .enumerate()
    {
        if o < 0 || o + s > d {
            return Err(ViewError::OutOfBounds { axis });
        }
    }
    Ok(())
}

/// Cursor over every integer coordinate of a region inside an image.
///
/// Yields `(position, sample)` pairs with the position in the image's
/// global space (local coordinate + region offset). Axis 0 varies fastest,
/// matching the image's storage order. Advancing past the last coordinate
/// reports exhaustion; there is no wraparound.
#[derive(Debug, Clone)]
pub struct RegionCursor<'a, T> {
    image: &'a NdImage<T>,
    region: Region,
    local: Coord,
    total: u64,
    remaining: u64,
}

impl<'a, T> RegionCursor<'a, T> {
    /// Cursor over `region` within `image`.
    ///
    /// The region must have the image's rank and lie inside its bounds.
    pub fn new(image: &'a NdImage<T>, region: Region) -> Result<Self, ViewError> {
        check_fit(&region, image.dims())?;
        Ok(Self::new_unchecked(image, region))
    }

    /// Cursor over the full extent of `image`.
    pub(crate) fn full(image: &'a NdImage<T>) -> Self {
        Self::new_unchecked(image, Region::full(image.dims()))
    }

    /// Fit of `region` in `image` must already be established.
    pub(crate) fn new_unchecked(image: &'a NdImage<T>, region: Region) -> Self {
        let total = region.num_elements();
        let local = smallvec![0; region.ndim()];
        Self {
            image,
            region,
            local,
            total,
            remaining: total,
        }
    }

    /// Whether another coordinate remains, without advancing.
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    /// The region being traversed.
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Odometer step: bump axis 0, carrying into higher axes.
    fn increment(&mut self) {
        for d in 0..self.local.len() {
            self.local[d] += 1;
            if self.local[d] < self.region.size[d] {
                return;
            }
            self.local[d] = 0;
        }
    }
}

impl<'a, T> Iterator for RegionCursor<'a, T> {
    type Item = (Coord, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        if self.remaining < self.total {
            self.increment();
        }
        self.remaining -= 1;

        let mut pos = self.local.clone();
        for (p, &o) in pos.iter_mut().zip(&self.region.offset) {
            *p += o;
        }
        let sample = &self.image.samples()[self.image.index_of(&pos)];
        Some((pos, sample))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for RegionCursor<'_, T> {}
