//! Adaptive refinement of the rough runs.
//!
//! The interval between two consecutive samples of a run is bisected
//! until consecutive samples are at most one pixel apart.  Next to a
//! place where `f` is unusable, bisection goes on towards it until
//! the interval is shorter than `delta`, so the graph gets as close
//! as possible to the hole.
//!
//! The bisection tree is walked depth first with an explicit stack.
//! Every interval is visited twice: the first visit emits its
//! left point and schedules the sub-intervals, the second one emits
//! its right point once all the sub-intervals have been handled.
//! This way the points come out ordered by increasing `x`.
//!
//! When both endpoints lie in the same pixel column, bisection could
//! go on forever (think of `1/x` near 0).  These intervals are
//! handled by a depth-limited recursion that stops as soon as all the
//! pixel rows between the endpoints have been visited, see
//! [`OccupancyTable`].

use log::{debug, warn};
use crate::{error::Result,
            eval::{Evaluator, SampleCoord},
            occupancy::OccupancyTable,
            rough::Run};

/// A point of the refined trace.  A `joined` point must be connected
/// to the previous one, whatever the gap between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Emitted {
    pub p: SampleCoord,
    pub joined: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    InsertLeft,
    InsertRight,
}

#[derive(Debug, Clone, Copy)]
struct Task {
    left: SampleCoord,
    right: SampleCoord,
    phase: Phase,
}

/// Return `true` if the segment between `a` and `b` (`a` being on the
/// left) is drawn continuously at the pixel level.
#[inline]
pub(crate) fn close_enough(a: &SampleCoord, b: &SampleCoord) -> bool {
    match (a.py, b.py) {
        (Some(ya), Some(yb)) => (yb - ya).abs() <= 1 && b.px - a.px <= 1,
        _ => false,
    }
}

pub(crate) struct Bisector<'e, 'f> {
    ev: &'e mut Evaluator<'f>,
    // Below this `x` distance, two points are considered identical.
    delta: f64,
    max_fill_depth: u32,
    // One table per pixel column, created on demand.
    columns: Vec<Option<OccupancyTable>>,
    out: Vec<Emitted>,
    out_of_budget: bool,
}

impl<'e, 'f> Bisector<'e, 'f> {
    pub fn new(ev: &'e mut Evaluator<'f>, delta_divisor: f64,
               max_fill_depth: u32) -> Self {
        let w = ev.window();
        let delta = (w.xmax - w.xmin) / (ev.width() as f64 * delta_divisor);
        let columns = vec![None; ev.width()];
        Bisector { ev, delta, max_fill_depth, columns,
                   out: vec![], out_of_budget: false }
    }

    #[inline]
    fn emit(&mut self, p: SampleCoord, joined: bool) {
        self.out.push(Emitted { p, joined });
    }

    /// Return `true` if no more evaluations may be performed.
    fn exhausted(&mut self) -> bool {
        if self.ev.exhausted() {
            if !self.out_of_budget {
                warn!("evaluation budget of {} exhausted, the graph \
                       may be missing details", self.ev.evaluations());
                self.out_of_budget = true;
            }
            true
        } else {
            false
        }
    }

    /// Return the point at the middle of \[`left`, `right`\] or `None`
    /// if there is no floating point number between them.
    fn mid(&mut self, left: &SampleCoord, right: &SampleCoord)
           -> Option<SampleCoord> {
        let x = 0.5 * (left.x + right.x);
        if left.x < x && x < right.x { Some(self.ev.point(x)) }
        else { None }
    }

    /// Refine all the `runs` and return the points in increasing `x`
    /// order (with duplicates).
    pub fn run(mut self, runs: &[Run]) -> Result<Vec<Emitted>> {
        // The first pair of the first run on top.
        let mut stack: Vec<Task> = runs.iter().rev()
            .flat_map(|r| r.windows(2).rev())
            .map(|w| Task { left: w[0],  right: w[1],
                            phase: Phase::InsertLeft })
            .collect();
        while let Some(task) = stack.pop() {
            let Task { left, right, phase } = task;
            if phase == Phase::InsertRight {
                self.emit(right, false);
                continue
            }
            if left.is_valid() { self.emit(left, false) }
            if right.is_valid() {
                stack.push(Task { phase: Phase::InsertRight, .. task });
            }
            // Nothing to approach between two unusable points.
            if !left.is_valid() && !right.is_valid() { continue }
            if (right.x - left.x).abs() <= self.delta
                || close_enough(&left, &right) || self.exhausted() {
                continue
            }
            if left.px == right.px && left.is_valid() && right.is_valid() {
                // Vertical: make sure we terminate.
                self.fill_vertical(left, right, self.max_fill_depth)?;
                continue
            }
            if let Some(mid) = self.mid(&left, &right) {
                stack.push(Task { left: mid, right,
                                  phase: Phase::InsertLeft });
                stack.push(Task { left, right: mid,
                                  phase: Phase::InsertLeft });
            }
        }
        debug!("refinement: {} points, {} evaluations",
               self.out.len(), self.ev.evaluations());
        Ok(self.out)
    }

    /// Refine \[`left`, `right`\], two points in the same pixel
    /// column, until all pixel rows in between are visited.
    fn fill_vertical(&mut self, left: SampleCoord, right: SampleCoord,
                     depth: u32) -> Result<()> {
        if depth == 0 || (left.py.is_none() && right.py.is_none()) {
            return Ok(())
        }
        let height = self.ev.height();
        let table = self.columns[left.px as usize]
            .get_or_insert_with(|| OccupancyTable::new(height));
        if let Some(y) = left.py { table.occupy(y as usize)?; }
        if let Some(y) = right.py { table.occupy(y as usize)?; }
        if let (Some(l), Some(r)) = (left.py, right.py) {
            if table.is_range_fully_occupied(l as usize, r as usize)? {
                self.emit(left, false);
                self.emit(right, true);
                return Ok(())
            }
        }
        if self.exhausted() { return Ok(()) }
        match self.mid(&left, &right) {
            Some(mid) => {
                self.fill_vertical(left, mid, depth - 1)?;
                self.fill_vertical(mid, right, depth - 1)
            }
            None => Ok(()),
        }
    }
}
