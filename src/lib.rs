#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! de Rham curve renderer
//!
//! A de Rham curve is the limit set of two contracting maps of the
//! plane, d0 and d1, that agree at a shared "half-way" point.  Every
//! point on the curve is an infinite binary string read as "apply d0"
//! or "apply d1".  The Cesàro curves, the Koch-Peano curves, the Lévy
//! C curve and the Takagi (blancmange) curve are all de Rham curves.
//!
//! The curve is drawn with the chaos game: start at the fixed point of
//! d0, repeatedly apply one of the two maps chosen at random, and plot
//! where the point goes.  The trajectory never ends, so the renderer
//! watches each new batch of points, and once nearly all of a batch
//! falls on pixels that are already lit, it calls the picture done.
//!
//! ```no_run
//! extern crate derham;
//! extern crate num;
//!
//! use derham::{render, CurveEngine, RenderOptions};
//! use num::Complex;
//!
//! let mut engine = CurveEngine::new(Complex::new(0.5, 1.0), 0.0, 0.6, 0.0, 0.6, Some(42)).unwrap();
//! let canvas = render(&mut engine, 800, 600, &RenderOptions::default()).unwrap();
//! canvas.save("blancmange.png").unwrap();
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate rand;
#[macro_use]
extern crate tracing;

pub mod canvas;
pub mod engine;
pub mod error;
pub mod gallery;
pub mod maps;
pub mod planes;
pub mod presets;
pub mod render;

pub use canvas::{Canvas, ColorTheme};
pub use engine::{Batches, CurveEngine};
pub use error::{Error, Result};
pub use gallery::render_gallery;
pub use maps::AffineMap3;
pub use planes::{CoordinateBounds, Pixel, PlaneMapper};
pub use presets::Preset;
pub use render::{render, render_with, Progress, RenderOptions};
