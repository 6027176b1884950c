use smallvec::SmallVec;

use crate::error::ImageError;
use crate::region::RegionCursor;
use crate::sample::Sample;

/// A coordinate or extent vector; stored inline up to four axes.
pub type Coord = SmallVec<[i64; 4]>;

/// N-dimensional image with axis 0 as the contiguous (fastest) axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NdImage<T> {
    dims: Coord,
    data: Vec<T>,
}

impl<T> NdImage<T> {
    /// Create an image from existing sample data.
    ///
    /// `data` must hold exactly the product of `dims` samples, laid out
    /// with axis 0 contiguous.
    pub fn from_vec(dims: &[i64], data: Vec<T>) -> Result<Self, ImageError> {
        let expected = checked_len(dims)?;
        if data.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            dims: Coord::from_slice(dims),
            data,
        })
    }

    pub fn dims(&self) -> &[i64] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat, borrowed view of the sample buffer.
    pub fn samples(&self) -> &[T] {
        &self.data
    }

    pub fn in_bounds(&self, pos: &[i64]) -> bool {
        pos.len() == self.dims.len()
            && pos.iter().zip(&self.dims).all(|(&p, &d)| p >= 0 && p < d)
    }

    /// Flat index of `pos`. `pos` must be in bounds.
    #[inline]
    pub(crate) fn index_of(&self, pos: &[i64]) -> usize {
        debug_assert_eq!(pos.len(), self.dims.len());
        let mut idx = 0i64;
        let mut stride = 1i64;
        for (d, &p) in pos.iter().enumerate() {
            idx += p * stride;
            stride *= self.dims[d];
        }
        idx as usize
    }

    /// Sample at `pos`, or `None` when out of bounds.
    pub fn get(&self, pos: &[i64]) -> Option<&T> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(&self.data[self.index_of(pos)])
    }

    /// Set the sample at `pos`.
    pub fn set(&mut self, pos: &[i64], value: T) {
        assert!(self.in_bounds(pos));
        let idx = self.index_of(pos);
        self.data[idx] = value;
    }

    /// Cursor over the full extent, axis 0 fastest.
    pub fn cursor(&self) -> RegionCursor<'_, T> {
        RegionCursor::full(self)
    }
}

impl<T: Sample> NdImage<T> {
    /// Create a zero-filled image.
    pub fn zeros(dims: &[i64]) -> Result<Self, ImageError> {
        let len = checked_len(dims)?;
        Ok(Self {
            dims: Coord::from_slice(dims),
            data: vec![T::zero(); len],
        })
    }
}

fn checked_len(dims: &[i64]) -> Result<usize, ImageError> {
    let mut len = 1usize;
    for (axis, &dim) in dims.iter().enumerate() {
        if dim < 0 {
            return Err(ImageError::NegativeDim { axis, dim });
        }
        len = len
            .checked_mul(dim as usize)
            .ok_or(ImageError::Overflow)?;
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;

    #[test]
    fn zeros_creates_zeroed_image() {
        let img: NdImage<u8> = NdImage::zeros(&[3, 4]).unwrap();
        assert_eq!(img.dims(), &[3, 4]);
        assert_eq!(img.ndim(), 2);
        assert_eq!(img.len(), 12);
        assert!(img.samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn from_vec_rejects_size_mismatch() {
        let err = NdImage::from_vec(&[2, 2], vec![1u8, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            ImageError::SizeMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn from_vec_rejects_negative_dim() {
        let err = NdImage::from_vec(&[2, -1], Vec::<u8>::new()).unwrap_err();
        assert_eq!(err, ImageError::NegativeDim { axis: 1, dim: -1 });
    }

    #[test]
    fn axis_zero_is_contiguous() {
        // dims [3, 2]: index = x + 3 * y
        let img = NdImage::from_vec(&[3, 2], vec![10u8, 11, 12, 20, 21, 22]).unwrap();
        assert_eq!(img.get(&[0, 0]), Some(&10));
        assert_eq!(img.get(&[2, 0]), Some(&12));
        assert_eq!(img.get(&[0, 1]), Some(&20));
        assert_eq!(img.get(&[2, 1]), Some(&22));
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let img: NdImage<u8> = NdImage::zeros(&[2, 2]).unwrap();
        assert_eq!(img.get(&[2, 0]), None);
        assert_eq!(img.get(&[0, -1]), None);
        assert_eq!(img.get(&[0]), None);
    }

    #[test]
    fn set_then_get() {
        let mut img: NdImage<u16> = NdImage::zeros(&[4, 4, 2]).unwrap();
        img.set(&[1, 2, 1], 700);
        assert_eq!(img.get(&[1, 2, 1]), Some(&700));
        assert_eq!(img.get(&[1, 2, 0]), Some(&0));
    }

    #[test]
    fn full_cursor_visits_in_storage_order() {
        let img = NdImage::from_vec(&[2, 2], vec![1u8, 2, 3, 4]).unwrap();
        let visited: Vec<(Vec<i64>, u8)> = img
            .cursor()
            .map(|(pos, &v)| (pos.to_vec(), v))
            .collect();
        assert_eq!(
            visited,
            vec![
                (vec![0, 0], 1),
                (vec![1, 0], 2),
                (vec![0, 1], 3),
                (vec![1, 1], 4),
            ]
        );
    }

    #[test]
    fn empty_dim_image_has_no_samples() {
        let img: NdImage<u8> = NdImage::zeros(&[0, 5]).unwrap();
        assert!(img.is_empty());
        assert_eq!(img.cursor().count(), 0);
    }
}
