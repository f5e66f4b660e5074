// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Well-known de Rham curves.
//!
//! Three classical families pin the four shape parameters to a single
//! complex number: the Cesàro curves, the Koch-Peano curves, and the
//! Takagi (blancmange) curves.  The rest of the catalogue is Linas
//! Vepstas' gallery of "simple" curves, which all share the half-way
//! point 0.5+1i.

use engine::CurveEngine;
use error::{Error, Result};
use num::Complex;
use std::fmt;
use std::str::FromStr;

/// A curve with half-way point 0.5+1i.
pub fn simple(delta: f64, epsilon: f64, zeta: f64, eta: f64, seed: Option<u64>) -> Result<CurveEngine> {
    CurveEngine::new(Complex::new(0.5, 1.0), delta, epsilon, zeta, eta, seed)
}

/// The Cesàro curve with half-way point `a`.
pub fn cesaro(a: Complex<f64>, seed: Option<u64>) -> Result<CurveEngine> {
    CurveEngine::new(a, -a.im, a.re, a.im, 1.0 - a.re, seed)
}

/// The Takagi curve with parameter `w`.
pub fn takagi(w: f64, seed: Option<u64>) -> Result<CurveEngine> {
    CurveEngine::new(Complex::new(0.5, 1.0), 0.0, w, 0.0, w, seed)
}

/// The Koch-Peano curve with apex `a`.
pub fn koch_peano(a: Complex<f64>, seed: Option<u64>) -> Result<CurveEngine> {
    CurveEngine::new(a, a.im, -a.re, -a.im, a.re - 1.0, seed)
}

// (delta, epsilon, zeta, eta) of the gallery, in order.
const GALLERY: [[f64; 4]; 42] = [
    [0.25, -0.47, -0.25, -0.47],
    [0.25, -0.25, -0.25, -0.25],
    [0.25, 0.00, -0.25, 0.00],
    [0.18, -0.38, -0.18, -0.42],
    [0.49, -0.38, 0.10, -0.42],
    [0.33, -0.38, -0.18, -0.42],
    [0.18, -0.28, -0.18, -0.72],
    [0.41, -0.28, 0.00, -0.58],
    [0.41, -0.06, 0.00, -0.58],
    [0.41, 0.10, 0.00, -0.58],
    [0.51, -0.10, 0.00, -0.58],
    [0.51, 0.10, -0.20, -0.58],
    [0.10, 0.15, 0.35, 0.88],
    [-0.05, 0.15, 0.35, 0.88],
    [0.00, 0.60, 0.30, 0.60],
    [0.00, 0.60, 0.18, 0.60],
    [0.00, 0.60, 0.00, 0.60],
    [0.00, -0.70, 0.00, 0.70],
    [-0.10, -0.40, -0.10, 0.80],
    [0.00, -0.70, -0.15, 0.80],
    [0.30, -0.70, -0.15, 0.80],
    [0.30, -0.70, -0.15, 0.00],
    [0.30, -0.70, -0.15, -0.30],
    [-0.10, -0.70, -0.15, -0.30],
    [-0.10, -0.80, -0.30, -0.60],
    [-0.10, -0.80, -0.30, -0.80],
    [-0.10, -0.40, -0.30, -0.80],
    [0.00, -0.60, 0.00, -0.60],
    [-0.35, 0.10, 0.30, -0.40],
    [-0.45, 0.50, 0.35, -0.45],
    [-0.45, 0.60, 0.50, -0.45],
    [-0.30, 0.60, 0.60, -0.20],
    [0.30, 0.15, 0.75, 0.18],
    [0.30, 0.15, 0.75, -0.48],
    [-0.35, 0.60, -0.16, 0.60],
    [-0.20, 0.40, 0.40, 0.00],
    [-0.15, 0.15, 0.15, 0.85],
    [-0.40, 0.40, 0.40, 0.40],
    [-0.30, -0.40, 0.20, 0.60],
    [-0.35, 0.00, 0.35, 0.00],
    [-0.35, 0.00, -0.35, 0.00],
    [-0.50, 0.00, 0.50, 0.00],
];

/// A named curve from the catalogue.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Preset {
    /// The Lévy C curve, as the Cesàro curve at 0.5+0.5i.
    LevyC,
    /// Vepstas, figure 2: Koch-Peano at 0.3+0.3i.
    CesaroFig2,
    /// The blancmange curve, Takagi at 0.6.
    Blancmange,
    /// The Koch curve.
    Koch,
    /// Vepstas, figure 3: Koch-Peano at 0.6+0.37i.
    KochPeanoFig3,
    /// Vepstas, figure 4: Koch-Peano at 0.6+0.45i.
    KochPeanoFig4,
    /// The Peano space-filling curve.
    Peano,
    /// Vepstas' gallery, numbered 1 to 42.
    Gallery(u8),
}

impl Preset {
    /// Every preset, gallery last.
    pub fn all() -> Vec<Preset> {
        let mut all = vec![
            Preset::LevyC,
            Preset::CesaroFig2,
            Preset::Blancmange,
            Preset::Koch,
            Preset::KochPeanoFig3,
            Preset::KochPeanoFig4,
            Preset::Peano,
        ];
        all.extend((1..=GALLERY.len() as u8).map(Preset::Gallery));
        all
    }

    /// The name accepted by `from_str`.
    pub fn name(&self) -> String {
        match *self {
            Preset::LevyC => "levy-c".to_string(),
            Preset::CesaroFig2 => "cesaro-fig2".to_string(),
            Preset::Blancmange => "blancmange".to_string(),
            Preset::Koch => "koch".to_string(),
            Preset::KochPeanoFig3 => "koch-peano-fig3".to_string(),
            Preset::KochPeanoFig4 => "koch-peano-fig4".to_string(),
            Preset::Peano => "peano".to_string(),
            Preset::Gallery(n) => format!("gallery-{:02}", n),
        }
    }

    /// A fresh engine for this curve.
    pub fn engine(&self, seed: Option<u64>) -> Result<CurveEngine> {
        match *self {
            Preset::LevyC => cesaro(Complex::new(0.5, 0.5), seed),
            Preset::CesaroFig2 => koch_peano(Complex::new(0.3, 0.3), seed),
            Preset::Blancmange => takagi(0.6, seed),
            Preset::Koch => koch_peano(Complex::new(0.5, 3f64.sqrt() / 6.0), seed),
            Preset::KochPeanoFig3 => koch_peano(Complex::new(0.6, 0.37), seed),
            Preset::KochPeanoFig4 => koch_peano(Complex::new(0.6, 0.45), seed),
            Preset::Peano => koch_peano(Complex::new(0.5, 0.5), seed),
            Preset::Gallery(n) => match GALLERY.get((n as usize).wrapping_sub(1)) {
                Some(p) => simple(p[0], p[1], p[2], p[3], seed),
                None => Err(unknown(&self.name())),
            },
        }
    }
}

fn unknown(name: &str) -> Error {
    Error::InvalidParameter(format!("unknown preset '{}'", name))
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Preset> {
        if s.starts_with("gallery-") {
            return match s["gallery-".len()..].parse::<u8>() {
                Ok(n) if n >= 1 && n as usize <= GALLERY.len() => Ok(Preset::Gallery(n)),
                _ => Err(unknown(s)),
            };
        }
        Preset::all()
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| unknown(s))
    }
}
