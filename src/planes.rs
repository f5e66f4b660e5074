//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the real plane where the curve lives.  Unlike a
//! Mandelbrot viewport, the real rectangle is not chosen by the user;
//! it is measured from a sample of the curve's own points.
use error::{Error, Result};
use itertools::{Itertools, MinMaxResult};
use num::{clamp, Complex};
use std::cmp::Ordering;

/// Extra room left around the sampled points on every side, so that
/// points sitting exactly on the extremes are not clipped.
pub const BOUNDS_MARGIN: f64 = 0.05;

/// Describes the x, y of a pixel, with 0,0 at the upper left of the
/// image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Axis-aligned bounds of the curve, with the margin already applied.
/// The real part of each corner is the x-component and the imaginary
/// part the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoordinateBounds {
    /// Smallest x and y.
    pub leftlower: Complex<f64>,
    /// Largest x and y.
    pub rightupper: Complex<f64>,
}

fn extremes<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    match values.minmax_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal)) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some((v, v)),
        MinMaxResult::MinMax(lo, hi) => Some((lo, hi)),
    }
}

impl CoordinateBounds {
    /// Measures the points and widens the result by [`BOUNDS_MARGIN`].
    /// Fails on an empty sample, or if any point is not finite.
    pub fn from_points(points: &[Complex<f64>]) -> Result<CoordinateBounds> {
        if let Some(index) = points.iter().position(|p| !(p.re.is_finite() && p.im.is_finite())) {
            return Err(Error::NumericDivergence { index });
        }
        let (xs, ys) = match (
            extremes(points.iter().map(|p| p.re)),
            extremes(points.iter().map(|p| p.im)),
        ) {
            (Some(xs), Some(ys)) => (xs, ys),
            _ => return Err(Error::NotReady),
        };
        Ok(CoordinateBounds {
            leftlower: Complex::new(xs.0 - BOUNDS_MARGIN, ys.0 - BOUNDS_MARGIN),
            rightupper: Complex::new(xs.1 + BOUNDS_MARGIN, ys.1 + BOUNDS_MARGIN),
        })
    }
}

/// Maps points on the curve's real plane to pixels of a canvas.  The
/// left edge of the bounds lands on column 0 and the right edge on the
/// last column; the upper edge lands on row 0, so the image comes out
/// the right way up.  Points outside the bounds are clamped onto the
/// border.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    bounds: CoordinateBounds,
    // The ratio mapping the width and height, respectively, of the
    // real plane onto the span of pixel indices.
    grid_factors: (f64, f64),
}

impl PlaneMapper {
    /// Takes the canvas size and the bounds of the real plane.
    pub fn new(width: usize, height: usize, bounds: CoordinateBounds) -> Result<PlaneMapper> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidParameter(
                "image dimensions must be at least 1x1".to_string(),
            ));
        }
        let region_width = bounds.rightupper.re - bounds.leftlower.re;
        let region_height = bounds.rightupper.im - bounds.leftlower.im;
        if !(region_width > 0.0 && region_height > 0.0) {
            return Err(Error::InvalidParameter(
                "the left lower corner must be below and to the left of the right upper corner"
                    .to_string(),
            ));
        }

        let grid_factors = (
            ((width - 1) as f64) / region_width,
            ((height - 1) as f64) / region_height,
        );

        Ok(PlaneMapper {
            width,
            height,
            bounds,
            grid_factors,
        })
    }

    /// The total number of pixels on the canvas.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Never true for a constructed mapper; present for symmetry with len.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The bounds this mapper was built with.
    pub fn bounds(&self) -> CoordinateBounds {
        self.bounds
    }

    /// Given a point on the curve's plane, find the pixel it falls in.
    /// `index` is only used to describe a non-finite point.
    pub fn point_to_pixel(&self, point: &Complex<f64>, index: usize) -> Result<Pixel> {
        if !(point.re.is_finite() && point.im.is_finite()) {
            return Err(Error::NumericDivergence { index });
        }
        let left = (point.re - self.bounds.leftlower.re) * self.grid_factors.0;
        let up = (point.im - self.bounds.leftlower.im) * self.grid_factors.1;
        let column = clamp(left, 0.0, (self.width - 1) as f64).floor() as usize;
        let row = clamp(up, 0.0, (self.height - 1) as f64).floor() as usize;
        Ok(Pixel(column, self.height - 1 - row))
    }

    /// As point_to_pixel, but returns the linear offset of the pixel
    /// from the root of a row-major image buffer.
    pub fn point_to_offset(&self, point: &Complex<f64>, index: usize) -> Result<usize> {
        let pixel = self.point_to_pixel(point, index)?;
        Ok(pixel.1 * self.width + pixel.0)
    }
}
