//! Uniform sampling of `f` at every pixel column, grouped into runs
//! of consecutive usable values.

use crate::eval::{Column, Evaluator, SampleCoord};

/// Samples with strictly increasing pixel columns, considered to
/// be a continuous piece of the graph.
pub(crate) type Run = Vec<SampleCoord>;

/// Scan the pixel columns in `cols` order.  The returned runs are
/// sorted by increasing column (whatever the scan direction) but
/// may be reduced to a single point.
fn scan<I>(ev: &mut Evaluator, cols: I) -> Vec<Run>
where I: Iterator<Item = usize> {
    let mut runs = vec![];
    let mut run = vec![];
    macro_rules! cut { () => {
        if !run.is_empty() {
            let mut r: Run = std::mem::take(&mut run);
            if r[0].px > r[r.len() - 1].px { r.reverse() }
            runs.push(r);
        }
    } }
    for i in cols {
        match ev.column(i) {
            Column::InRange(p) => run.push(p),
            Column::Clamped(p) => { // Leaves the window: ends the run.
                run.push(p);
                cut!();
            }
            Column::Invalid => cut!(),
        }
    }
    cut!();
    runs
}

/// Merge runs whose column spans intersect.  Samples at the same
/// column are identical, only one is kept.  Runs with less than two
/// points are dropped.
fn merge(mut runs: Vec<Run>) -> Vec<Run> {
    runs.sort_by_key(|r| r[0].px);
    let mut merged: Vec<Run> = Vec::with_capacity(runs.len());
    for r in runs {
        match merged.last_mut() {
            Some(last) if r[0].px <= last[last.len() - 1].px => {
                last.extend(r);
                last.sort_by_key(|p| p.px);
                last.dedup_by_key(|p| p.px);
            }
            _ => merged.push(r),
        }
    }
    merged.retain(|r| r.len() >= 2);
    merged
}

/// Rough trace of the graph.  The columns are scanned in both
/// directions: a value leaving the window ends a run in the scan
/// direction, so each pass keeps the boundary point on a different
/// side of a jump.
pub(crate) fn sample(ev: &mut Evaluator) -> Vec<Run> {
    let width = ev.width();
    let mut runs = scan(ev, 0 .. width);
    runs.extend(scan(ev, (0 .. width).rev()));
    merge(runs)
}


#[cfg(test)]
mod tests {
    use super::{sample, merge, Run};
    use crate::{Window, eval::{Evaluator, SampleCoord, Value}};

    fn spans(runs: &[Run]) -> Vec<(i64, i64)> {
        runs.iter().map(|r| (r[0].px, r[r.len() - 1].px)).collect()
    }

    fn pt(px: i64) -> SampleCoord {
        SampleCoord { x: px as f64, y: Some(0.), px, py: Some(0) }
    }

    #[test]
    fn merge_overlapping() {
        let runs = vec![vec![pt(5), pt(6), pt(7)],
                        vec![pt(0), pt(1), pt(2)],
                        vec![pt(2), pt(3)],
                        vec![pt(9)],
                        vec![pt(6), pt(7), pt(8)]];
        let m = merge(runs);
        assert_eq!(spans(&m), vec![(0, 3), (5, 8)]);
        assert_eq!(m[0].iter().map(|p| p.px).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(m[1].len(), 4);
    }

    #[test]
    fn identity() {
        let w = Window::new(-10., 10., -10., 10.).unwrap();
        let mut f = |x: f64| x.into_real();
        let mut ev = Evaluator::new(&mut f, w, 401, 401, usize::MAX).unwrap();
        let runs = sample(&mut ev);
        assert_eq!(spans(&runs), vec![(0, 400)]);
        assert_eq!(runs[0].len(), 401);
        assert_eq!(ev.evaluations(), 802);
    }

    #[test]
    fn pole_keeps_both_boundary_points() {
        // Pixel columns fall on multiples of 1/16.
        let w = Window::new(-8., 8., -8., 8.).unwrap();
        let mut f = |x: f64| (1. / x).into_real();
        let mut ev = Evaluator::new(&mut f, w, 257, 257, usize::MAX).unwrap();
        let runs = sample(&mut ev);
        assert_eq!(spans(&runs), vec![(0, 127), (129, 256)]);
        // Clamped at the bottom and the top of the window.
        assert_eq!((runs[0][127].y, runs[0][127].py), (Some(-8.), Some(256)));
        assert_eq!((runs[1][0].y, runs[1][0].py), (Some(8.), Some(0)));
        assert_eq!(runs[1][1].y, Some(8.));
    }

    #[test]
    fn undefined_left_half() {
        let w = Window::new(-10., 10., 0., 10.).unwrap();
        let mut f = |x: f64| {
            let y = if x < 0. { None } else { Some(x.sqrt()) };
            y.into_real()
        };
        let mut ev = Evaluator::new(&mut f, w, 401, 401, usize::MAX).unwrap();
        let runs = sample(&mut ev);
        assert_eq!(spans(&runs), vec![(200, 400)]);
    }

    #[test]
    fn isolated_points_dropped() {
        let w = Window::new(0., 10., -1., 1.).unwrap();
        // Defined only at even columns.
        let mut f = |x: f64| {
            let y = if (x.round() as i64) % 2 == 0 { Some(0f64) } else { None };
            y.into_real()
        };
        let mut ev = Evaluator::new(&mut f, w, 11, 11, usize::MAX).unwrap();
        assert!(sample(&mut ev).is_empty());
    }
}
