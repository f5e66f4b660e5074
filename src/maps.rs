// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two contracting maps of a de Rham curve.
//!
//! A de Rham curve needs two contracting maps d0 and d1 with fixed
//! points p0 and p1, and the continuity condition d0(p1) = d1(p0).
//! Written as 3x3 matrices acting on homogeneous points (1, x, y), and
//! with p0 = (0, 0) and p1 = (1, 0), the maps reduce to a half-way point
//! (alpha, beta) plus four free parameters.  d0 is always linear; d1 is
//! affine.  The continuity condition holds for every choice of
//! parameters: both d0(p1) and d1(p0) land on the half-way point.

use num::Complex;

/// A 3x3 matrix acting on homogeneous points (1, x, y).  The first row
/// is always (1, 0, 0), so the leading 1 survives every application and
/// is never stored with the points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineMap3(pub [[f64; 3]; 3]);

impl AffineMap3 {
    /// The linear map d0.
    pub fn d0(halfway: Complex<f64>, delta: f64, epsilon: f64) -> AffineMap3 {
        let (alpha, beta) = (halfway.re, halfway.im);
        AffineMap3([
            [1.0, 0.0, 0.0],
            [0.0, alpha, delta],
            [0.0, beta, epsilon],
        ])
    }

    /// The affine map d1.
    pub fn d1(halfway: Complex<f64>, zeta: f64, eta: f64) -> AffineMap3 {
        let (alpha, beta) = (halfway.re, halfway.im);
        AffineMap3([
            [1.0, 0.0, 0.0],
            [alpha, 1.0 - alpha, zeta],
            [beta, -beta, eta],
        ])
    }

    /// Applies the map to the point (1, re, im).
    #[inline]
    pub fn apply(&self, point: Complex<f64>) -> Complex<f64> {
        let m = &self.0;
        Complex::new(
            m[1][0] + m[1][1] * point.re + m[1][2] * point.im,
            m[2][0] + m[2][1] * point.re + m[2][2] * point.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a - b).norm() < 1e-12
    }

    #[test]
    fn fixed_points_are_the_ends_of_the_curve() {
        let a = Complex::new(0.3, 0.4);
        let d0 = AffineMap3::d0(a, -0.4, 0.3);
        let d1 = AffineMap3::d1(a, 0.4, 0.7);
        assert!(close(d0.apply(Complex::new(0.0, 0.0)), Complex::new(0.0, 0.0)));
        assert!(close(d1.apply(Complex::new(1.0, 0.0)), Complex::new(1.0, 0.0)));
    }

    #[test]
    fn continuity_meets_at_the_halfway_point() {
        for &(a, p) in &[
            (Complex::new(0.5, 1.0), [0.0, 0.6, 0.0, 0.6]),
            (Complex::new(0.6, 0.45), [0.45, -0.6, -0.45, -0.4]),
            (Complex::new(0.5, 1.0), [0.3, -0.7, -0.15, -0.3]),
        ] {
            let d0 = AffineMap3::d0(a, p[0], p[1]);
            let d1 = AffineMap3::d1(a, p[2], p[3]);
            let p0 = Complex::new(0.0, 0.0);
            let p1 = Complex::new(1.0, 0.0);
            assert!(close(d0.apply(p1), a));
            assert!(close(d1.apply(p0), a));
        }
    }

    #[test]
    fn apply_is_the_matrix_product() {
        let d1 = AffineMap3::d1(Complex::new(0.5, 1.0), 0.2, 0.6);
        // (1, 2, 3) -> (1, 0.5 + 0.5*2 + 0.2*3, 1 - 2 + 0.6*3)
        assert!(close(d1.apply(Complex::new(2.0, 3.0)), Complex::new(2.1, 0.8)));
    }
}
