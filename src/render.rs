// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rasterizing a curve.
//!
//! The chaos game never finishes, so the question is when to stop.
//! Each batch of new points is checked against the canvas before it is
//! painted: the share of points that land on pixels which are already
//! lit says how much of the curve is still undiscovered.  Once that
//! share reaches the cutoff, the picture is taken to be complete.

use canvas::{Canvas, ColorTheme};
use engine::CurveEngine;
use error::{check_positive, Error, Result};
use planes::{CoordinateBounds, PlaneMapper};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// How many points are generated up front to measure the curve.
pub const BOUNDS_SAMPLE: usize = 10_000;

/// The knobs of a render.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Points drawn between completeness checks.
    pub batch_size: usize,
    /// Share of a batch that must land on lit pixels for the render to
    /// stop, in [0, 1].
    pub completeness_cutoff: f64,
    /// Background and foreground tones.
    pub theme: ColorTheme,
    /// Give up with [`Error::BatchLimit`] after this many batches.
    pub max_batches: Option<usize>,
    /// When set to true by another thread, the render stops with
    /// [`Error::Cancelled`] before its next batch.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for RenderOptions {
    fn default() -> RenderOptions {
        RenderOptions {
            batch_size: 1000,
            completeness_cutoff: 0.99,
            theme: ColorTheme::Dark,
            max_batches: None,
            cancel: None,
        }
    }
}

impl RenderOptions {
    fn validate(&self) -> Result<()> {
        check_positive("batch size", self.batch_size)?;
        let cutoff = self.completeness_cutoff;
        if !(cutoff.is_finite() && cutoff >= 0.0 && cutoff <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "completeness cutoff must be between 0 and 1, got {}",
                cutoff
            )));
        }
        if let Some(limit) = self.max_batches {
            check_positive("batch limit", limit)?;
        }
        Ok(())
    }

    fn cancelled(&self) -> bool {
        match self.cancel {
            Some(ref flag) => flag.load(Ordering::Relaxed),
            None => false,
        }
    }
}

/// Milestones reported while a render runs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Progress {
    /// Bounds are measured; batches are about to start.
    Started,
    /// A batch reached this completeness, in percent.
    Reached(u32),
    /// The cutoff was met.
    Done,
}

// Hands out percentage milestones: every 10% at first, then every 1%
// once within ten points of the cutoff.
struct Milestones {
    next: u32,
    fine_from: i64,
}

impl Milestones {
    fn new(cutoff: f64) -> Milestones {
        Milestones {
            next: 10,
            fine_from: (100.0 * cutoff) as i64 - 10,
        }
    }

    fn pass(&mut self, completeness: f64) -> Option<u32> {
        if completeness < f64::from(self.next) / 100.0 {
            return None;
        }
        let reached = self.next;
        self.next += if i64::from(reached) >= self.fine_from { 1 } else { 10 };
        Some(reached)
    }
}

/// Renders with no progress observer.
pub fn render(
    engine: &mut CurveEngine,
    width: usize,
    height: usize,
    options: &RenderOptions,
) -> Result<Canvas> {
    render_with(engine, width, height, options, |_| {})
}

/// Renders the curve onto a `width` by `height` canvas.
///
/// The engine first grows by [`BOUNDS_SAMPLE`] points, and the bounds of
/// everything it holds fix the mapping to pixels for the rest of the
/// render.  Batches are then read from the start of the buffer, so the
/// sample itself is drawn before any new points are made.  The batch
/// that meets the cutoff is only measured, never painted.
pub fn render_with<F>(
    engine: &mut CurveEngine,
    width: usize,
    height: usize,
    options: &RenderOptions,
    mut observer: F,
) -> Result<Canvas>
where
    F: FnMut(Progress),
{
    options.validate()?;
    let mut canvas = Canvas::new(width, height, options.theme)?;

    engine.calculate_points(BOUNDS_SAMPLE)?;
    let bounds = CoordinateBounds::from_points(engine.points()?)?;
    let plane = PlaneMapper::new(width, height, bounds)?;
    info!(
        width,
        height,
        xmin = bounds.leftlower.re,
        xmax = bounds.rightupper.re,
        ymin = bounds.leftlower.im,
        ymax = bounds.rightupper.im,
        "rendering curve"
    );
    observer(Progress::Started);

    let mut milestones = Milestones::new(options.completeness_cutoff);
    let mut batches = engine.generate(options.batch_size)?;
    let mut offsets = Vec::with_capacity(options.batch_size);
    let mut count = 0;
    loop {
        if options.cancelled() {
            info!(batches = count, "render cancelled");
            return Err(Error::Cancelled);
        }
        if let Some(limit) = options.max_batches {
            if count >= limit {
                return Err(Error::BatchLimit { batches: limit });
            }
        }

        let first = batches.offset();
        offsets.clear();
        for (i, point) in batches.next_batch(engine)?.iter().enumerate() {
            offsets.push(plane.point_to_offset(point, first + i)?);
        }
        count += 1;

        let lit = offsets.iter().filter(|&&o| canvas.is_painted(o)).count();
        let completeness = lit as f64 / options.batch_size as f64;
        debug!(batch = count, completeness, "measured batch");

        if completeness >= options.completeness_cutoff {
            info!(batches = count, painted = canvas.painted(), "curve complete");
            observer(Progress::Done);
            return Ok(canvas);
        }
        while let Some(percent) = milestones.pass(completeness) {
            info!(percent, "render progress");
            observer(Progress::Reached(percent));
        }
        for &offset in &offsets {
            canvas.paint(offset);
        }
    }
}
