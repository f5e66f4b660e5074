// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rendering many curves at once.  A single render is a strictly
//! sequential walk, so the only parallelism on offer is between
//! curves: each worker pulls the next engine off a shared queue and
//! renders it start to finish on its own thread.

extern crate crossbeam;

use canvas::Canvas;
use crossbeam::thread::ScopedJoinHandle;
use engine::CurveEngine;
use error::{check_positive, Error, Result};
use render::{render, RenderOptions};
use std::sync::{Arc, Mutex};

type Finished = (usize, String, Result<Canvas>);

/// Renders every `(name, engine)` job on `threads` worker threads.
/// Results come back in job order; one failed curve does not stop the
/// others.
pub fn render_gallery(
    jobs: Vec<(String, CurveEngine)>,
    width: usize,
    height: usize,
    options: &RenderOptions,
    threads: usize,
) -> Result<Vec<(String, Result<Canvas>)>> {
    check_positive("thread count", threads)?;
    let queue = Arc::new(Mutex::new(jobs.into_iter().enumerate()));

    let scoped = crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<Finished>>> = (0..threads)
            .map(|_| {
                let queue = queue.clone();
                spawner.spawn(move |_| {
                    let mut finished: Vec<Finished> = vec![];
                    loop {
                        let job = match queue.lock() {
                            Ok(mut queue) => queue.next(),
                            Err(_) => None,
                        };
                        match job {
                            Some((index, (name, mut engine))) => {
                                let result = render(&mut engine, width, height, options);
                                info!(curve = %name, ok = result.is_ok(), "gallery render finished");
                                finished.push((index, name, result));
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    finished
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| Error::WorkerPanicked))
            .collect::<Result<Vec<Vec<Finished>>>>()
    });

    let mut finished: Vec<Finished> = match scoped {
        Ok(Ok(batches)) => batches.into_iter().flatten().collect(),
        Ok(Err(e)) => return Err(e),
        Err(_) => return Err(Error::WorkerPanicked),
    };
    finished.sort_by_key(|f| f.0);
    Ok(finished
        .into_iter()
        .map(|(_, name, result)| (name, result))
        .collect())
}
