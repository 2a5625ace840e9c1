//! Cutting the refined trace into polylines.

use crate::{eval::SampleCoord, refine::Emitted, rough::Run};

/// Polyline of samples (all valid).
pub(crate) type Line = Vec<SampleCoord>;

/// Return `true` if going from `a` to `b` is a visible jump: more
/// than one pixel in either direction.
#[inline]
fn is_gap(a: &SampleCoord, b: &SampleCoord) -> bool {
    match (a.py, b.py) {
        (Some(ya), Some(yb)) => (yb - ya).abs() > 1 || b.px - a.px > 1,
        _ => true,
    }
}

/// Group the refined points into polylines, breaking wherever two
/// consecutive points are more than a pixel apart.  Points outside
/// of the `height` pixel rows and consecutive duplicates are
/// removed.  Polylines with less than 2 points are dropped.
pub(crate) fn assemble(points: &[Emitted], height: usize) -> Vec<Line> {
    let mut lines = vec![];
    let mut line: Line = vec![];
    let mut prev: Option<SampleCoord> = None;
    for &Emitted { p, joined } in points {
        match p.py {
            Some(py) if 0 <= py && py < height as i64 => (),
            _ => continue,
        }
        if let Some(q) = prev {
            if q.x == p.x && q.y == p.y { continue }
        }
        prev = Some(p);
        if let Some(q) = line.last() {
            if !joined && is_gap(q, &p) {
                lines.push(std::mem::take(&mut line));
            }
        }
        line.push(p);
    }
    lines.push(line);
    lines.retain(|l| l.len() >= 2);
    lines
}

/// Return the rough samples lying within the `x`-span of each line,
/// grouped accordingly.  The lines must be sorted by `x`.
pub(crate) fn reproject(lines: &[Line], rough: &[Run]) -> Vec<Line> {
    let mut spans = lines.iter()
        .map(|l| (l[0].x, l[l.len() - 1].x))
        .peekable();
    let mut groups = vec![];
    let mut group: Line = vec![];
    for &p in rough.iter().flatten() {
        while let Some(&(_, right)) = spans.peek() {
            if right < p.x {
                spans.next();
                groups.push(std::mem::take(&mut group));
            } else {
                break
            }
        }
        match spans.peek() {
            Some(&(left, right)) if left <= p.x && p.x <= right =>
                group.push(p),
            Some(_) => (),
            None => break,
        }
    }
    groups.push(group);
    groups.retain(|g| g.len() >= 2);
    groups
}


#[cfg(test)]
mod tests {
    use super::{assemble, reproject};
    use crate::{eval::SampleCoord, refine::Emitted};

    fn e(px: i64, py: i64) -> Emitted {
        Emitted { p: SampleCoord { x: px as f64, y: Some(-py as f64),
                                   px, py: Some(py) },
                  joined: false }
    }

    fn pixels(lines: &[Vec<SampleCoord>]) -> Vec<Vec<(i64, i64)>> {
        lines.iter()
            .map(|l| l.iter().map(|p| (p.px, p.py.unwrap())).collect())
            .collect()
    }

    #[test]
    fn split_on_gaps() {
        let pts = vec![e(0, 5), e(0, 5), e(1, 6), e(2, 6), e(2, 9),
                       e(3, 9), e(5, 9), e(6, 10), e(8, 0)];
        assert_eq!(pixels(&assemble(&pts, 20)),
                   vec![vec![(0, 5), (1, 6), (2, 6)],
                        vec![(2, 9), (3, 9)],
                        vec![(5, 9), (6, 10)]]);
    }

    #[test]
    fn joined_points_are_kept_together() {
        let mut pts = vec![e(0, 0), e(0, 10), e(1, 11)];
        pts[1].joined = true;
        assert_eq!(pixels(&assemble(&pts, 20)),
                   vec![vec![(0, 0), (0, 10), (1, 11)]]);
    }

    #[test]
    fn out_of_rows_dropped() {
        let mut pts = vec![e(0, -1), e(1, 0), e(2, 1), e(3, 2), e(4, 3)];
        pts[3].p.py = None;
        assert_eq!(pixels(&assemble(&pts, 3)), vec![vec![(1, 0), (2, 1)]]);
        assert!(assemble(&[], 10).is_empty());
        assert!(assemble(&[e(0, 0)], 10).is_empty());
    }

    #[test]
    fn reproject_on_rough() {
        let rough: Vec<Vec<SampleCoord>> =
            vec![(0 .. 5).map(|i| e(i, 0).p).collect(),
                 (6 .. 12).map(|i| e(i, 0).p).collect()];
        let lines = vec![vec![e(0, 0).p, e(1, 0).p, e(3, 0).p],
                         vec![e(7, 0).p, e(10, 0).p],
                         vec![e(11, 0).p, e(11, 1).p]];
        let g = reproject(&lines, &rough);
        assert_eq!(g.iter().map(|l| l.iter().map(|p| p.px).collect())
                   .collect::<Vec<Vec<i64>>>(),
                   vec![vec![0, 1, 2, 3], vec![7, 8, 9, 10]]);
    }
}
