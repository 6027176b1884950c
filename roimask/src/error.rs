use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("buffer holds {actual} samples but dims require {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("negative dimension {dim} on axis {axis}")]
    NegativeDim { axis: usize, dim: i64 },

    #[error("image size overflows usize")]
    Overflow,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegionError {
    #[error("offset has {offset} axes but size has {size}")]
    RankMismatch { offset: usize, size: usize },

    #[error("negative size {size} on axis {axis}")]
    NegativeSize { axis: usize, size: i64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error(transparent)]
    Region(#[from] RegionError),

    #[error("region spans {region} axes but image has {image}")]
    RankMismatch { region: usize, image: usize },

    #[error("mask dims {mask:?} do not match region size {region:?}")]
    MaskShape { mask: Vec<i64>, region: Vec<i64> },

    #[error("region extends outside the image on axis {axis}")]
    OutOfBounds { axis: usize },

    #[error("interpolation over a masked region is not supported")]
    UnsupportedInterpolation,
}
