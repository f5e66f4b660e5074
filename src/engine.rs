// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The chaos game for de Rham curves.
//!
//! The curve is the set of all infinite binary strings, where 0 means
//! "apply d0" and 1 means "apply d1".  The chaos game walks a random
//! such string: start at the fixed point of d0, then repeatedly pick
//! one of the two maps with equal probability and apply it to the last
//! point.  The trajectory fills in the curve.
//!
//! Points are expensive to regenerate and cheap to keep, so every point
//! the engine produces is kept in an append-only buffer.  Callers read
//! the buffer in fixed-size batches through a [`Batches`] cursor: the
//! cursor walks the points already stored, and only when it runs off
//! the end does the engine grow the buffer, by just enough to fill the
//! batch.

use error::{check_positive, check_unit, Error, Result};
use maps::AffineMap3;
use num::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Owns the two maps, the random source, and every point generated so
/// far.
#[derive(Debug)]
pub struct CurveEngine {
    halfway: Complex<f64>,
    d0: AffineMap3,
    d1: AffineMap3,
    rng: StdRng,
    points: Vec<Complex<f64>>,
    // Bumped on every clear, so that older cursors can tell they no
    // longer describe this buffer.
    epoch: u64,
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl CurveEngine {
    /// Builds the engine from the half-way point and the four shape
    /// parameters.  Every value must be finite and lie in [-1, 1].
    /// Outside that range the maps cannot contract, but passing the
    /// check does not make them contract either: some in-range choices
    /// still send the chaos game off to infinity, which rendering
    /// reports as [`Error::NumericDivergence`].  `None` seeds from the
    /// operating system.
    pub fn new(
        halfway: Complex<f64>,
        delta: f64,
        epsilon: f64,
        zeta: f64,
        eta: f64,
        seed: Option<u64>,
    ) -> Result<CurveEngine> {
        check_unit("alpha", halfway.re)?;
        check_unit("beta", halfway.im)?;
        check_unit("delta", delta)?;
        check_unit("epsilon", epsilon)?;
        check_unit("zeta", zeta)?;
        check_unit("eta", eta)?;

        Ok(CurveEngine {
            halfway,
            d0: AffineMap3::d0(halfway, delta, epsilon),
            d1: AffineMap3::d1(halfway, zeta, eta),
            rng: seeded(seed),
            points: Vec::new(),
            epoch: 0,
        })
    }

    /// The point where d0(p1) and d1(p0) meet.
    pub fn halfway_point(&self) -> Complex<f64> {
        self.halfway
    }

    /// The two maps, d0 first.
    pub fn maps(&self) -> (&AffineMap3, &AffineMap3) {
        (&self.d0, &self.d1)
    }

    /// Replaces the random source.  Points already generated are kept.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = seeded(seed);
    }

    /// One move of the chaos game.
    pub fn step(&mut self, point: Complex<f64>) -> Complex<f64> {
        if self.rng.gen::<f64>() < 0.5 {
            self.d0.apply(point)
        } else {
            self.d1.apply(point)
        }
    }

    /// Every point generated so far.
    pub fn points(&self) -> Result<&[Complex<f64>]> {
        if self.points.is_empty() {
            return Err(Error::NotReady);
        }
        Ok(&self.points)
    }

    /// The number of points stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True until the first point is generated, and again after a clear.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends `count` new points to the buffer.  On an empty buffer the
    /// first of them is the starting point itself.
    pub fn calculate_points(&mut self, count: usize) -> Result<()> {
        check_positive("point count", count)?;
        let target = self.points.len() + count;
        self.grow_to(target);
        Ok(())
    }

    /// Forgets every point.  The random source carries on from where it
    /// was, so the next points are a fresh realization rather than a
    /// replay.  Cursors handed out before the clear become stale.
    pub fn clear(&mut self) {
        self.points = Vec::new();
        self.epoch += 1;
    }

    /// Starts a new cursor over the buffer, in batches of `batch_size`.
    /// The cursor begins with the points that already exist.
    pub fn generate(&self, batch_size: usize) -> Result<Batches> {
        check_positive("batch size", batch_size)?;
        Ok(Batches {
            offset: 0,
            batch_size,
            epoch: self.epoch,
        })
    }

    fn grow_to(&mut self, target: usize) {
        if target <= self.points.len() {
            return;
        }
        self.points.reserve(target - self.points.len());
        if self.points.is_empty() {
            self.points.push(Complex::new(0.0, 0.0));
        }
        trace!(from = self.points.len(), to = target, "growing point buffer");
        while self.points.len() < target {
            let last = self.points[self.points.len() - 1];
            let next = self.step(last);
            self.points.push(next);
        }
    }
}

/// A cursor over an engine's points.  Each cursor remembers its own
/// position, so several can walk the same engine independently; they
/// take the engine by `&mut` because reading past the end grows it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Batches {
    offset: usize,
    batch_size: usize,
    epoch: u64,
}

impl Batches {
    /// The number of points in every batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Buffer index of the first point of the next batch.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the next `batch_size` points, generating whatever part
    /// of the batch is not already stored.  Never shorter than
    /// `batch_size`, never regenerates a stored point.
    pub fn next_batch<'e>(&mut self, engine: &'e mut CurveEngine) -> Result<&'e [Complex<f64>]> {
        if engine.epoch != self.epoch {
            return Err(Error::StaleCursor);
        }
        let start = self.offset;
        let end = start + self.batch_size;
        engine.grow_to(end);
        self.offset = end;
        Ok(&engine.points[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn takagi(seed: u64) -> CurveEngine {
        CurveEngine::new(Complex::new(0.5, 1.0), 0.0, 0.6, 0.0, 0.6, Some(seed)).unwrap()
    }

    #[test]
    fn rejects_parameters_outside_the_unit_range() {
        let a = Complex::new(0.5, 1.0);
        assert!(CurveEngine::new(a, 1.5, 0.0, 0.0, 0.0, None).is_err());
        assert!(CurveEngine::new(a, 0.0, 0.0, 0.0, -1.01, None).is_err());
        assert!(CurveEngine::new(Complex::new(2.0, 0.0), 0.0, 0.0, 0.0, 0.0, None).is_err());
        assert!(CurveEngine::new(a, ::std::f64::NAN, 0.0, 0.0, 0.0, None).is_err());
        assert!(CurveEngine::new(a, -1.0, 1.0, -1.0, 1.0, None).is_ok());
    }

    #[test]
    fn points_before_generation_is_not_ready() {
        let engine = takagi(1);
        assert_eq!(engine.points().unwrap_err(), Error::NotReady);
        assert!(engine.is_empty());
    }

    #[test]
    fn first_point_is_the_origin() {
        let mut engine = takagi(1);
        let mut batches = engine.generate(10).unwrap();
        let batch = batches.next_batch(&mut engine).unwrap();
        assert_eq!(batch[0], Complex::new(0.0, 0.0));
    }

    #[test]
    fn each_point_is_one_map_of_the_last() {
        let mut engine = takagi(7);
        engine.calculate_points(200).unwrap();
        let (d0, d1) = engine.maps();
        let points = engine.points().unwrap();
        for pair in points.windows(2) {
            assert!(pair[1] == d0.apply(pair[0]) || pair[1] == d1.apply(pair[0]));
        }
    }

    #[test]
    fn both_maps_are_used() {
        let mut engine = takagi(3);
        engine.calculate_points(1000).unwrap();
        let (d0, _) = engine.maps();
        let points = engine.points().unwrap();
        let zeros = points.windows(2).filter(|p| p[1] == d0.apply(p[0])).count();
        assert!(zeros > 400 && zeros < 600, "d0 used {} times of 999", zeros);
    }

    #[test]
    fn same_seed_same_points() {
        let (mut a, mut b) = (takagi(42), takagi(42));
        let (mut ca, mut cb) = (a.generate(37).unwrap(), b.generate(37).unwrap());
        for _ in 0..5 {
            let pa = ca.next_batch(&mut a).unwrap().to_vec();
            let pb = cb.next_batch(&mut b).unwrap().to_vec();
            assert_eq!(pa, pb);
        }
        b.calculate_points(13).unwrap();
        a.calculate_points(13).unwrap();
        assert_eq!(a.points().unwrap(), b.points().unwrap());
    }

    #[test]
    fn batches_are_always_full() {
        let mut engine = takagi(5);
        engine.calculate_points(25).unwrap();
        let mut batches = engine.generate(10).unwrap();
        // Two stored batches, a padded third, then fresh ones.
        for i in 0..6 {
            let len = batches.next_batch(&mut engine).unwrap().len();
            assert_eq!(len, 10);
            assert_eq!(engine.len(), ::std::cmp::max(25, 10 * (i + 1)));
        }
    }

    #[test]
    fn stored_points_are_yielded_before_new_ones() {
        let mut engine = takagi(9);
        engine.calculate_points(30).unwrap();
        let stored = engine.points().unwrap().to_vec();
        let mut batches = engine.generate(10).unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.extend_from_slice(batches.next_batch(&mut engine).unwrap());
        }
        assert_eq!(seen, stored);
        assert_eq!(engine.len(), 30);
    }

    #[test]
    fn accumulation_is_monotonic() {
        let mut engine = takagi(11);
        let mut batches = engine.generate(16).unwrap();
        let mut snapshot: Vec<Complex<f64>> = Vec::new();
        for _ in 0..8 {
            batches.next_batch(&mut engine).unwrap();
            let points = engine.points().unwrap();
            assert!(points.len() >= snapshot.len());
            assert_eq!(&points[..snapshot.len()], &snapshot[..]);
            snapshot = points.to_vec();
        }
        // A second cursor walks the same history again.
        let mut again = engine.generate(16).unwrap();
        let first = again.next_batch(&mut engine).unwrap().to_vec();
        assert_eq!(&first[..], &snapshot[..16]);
    }

    #[test]
    fn clear_continues_the_random_state() {
        let mut engine = takagi(42);
        let mut batches = engine.generate(50).unwrap();
        let before = batches.next_batch(&mut engine).unwrap().to_vec();
        engine.clear();
        assert_eq!(engine.points().unwrap_err(), Error::NotReady);
        assert_eq!(batches.next_batch(&mut engine).unwrap_err(), Error::StaleCursor);

        let mut batches = engine.generate(50).unwrap();
        let after = batches.next_batch(&mut engine).unwrap().to_vec();
        assert_eq!(after.len(), 50);
        assert_eq!(after[0], Complex::new(0.0, 0.0));
        assert_ne!(before, after);

        // The continuation is what a fresh engine would produce after
        // consuming the same number of draws.
        let mut fresh = takagi(42);
        fresh.calculate_points(50).unwrap();
        fresh.clear();
        fresh.calculate_points(50).unwrap();
        assert_eq!(fresh.points().unwrap(), &after[..]);
    }

    #[test]
    fn reseed_replays_the_walk() {
        let mut engine = takagi(8);
        engine.calculate_points(20).unwrap();
        let first = engine.points().unwrap().to_vec();
        engine.clear();
        engine.reseed(Some(8));
        engine.calculate_points(20).unwrap();
        assert_eq!(engine.points().unwrap(), &first[..]);
    }

    #[test]
    fn zero_sized_requests_are_rejected() {
        let mut engine = takagi(1);
        assert!(engine.generate(0).is_err());
        assert!(engine.calculate_points(0).is_err());
    }
}
