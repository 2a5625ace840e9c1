//! Choosing a window from data.

use crate::Window;

/// Return `[min, max]` widened by a tenth of its length on each side
/// or by 1 if it is reduced to a point.
fn widen(min: f64, max: f64) -> (f64, f64) {
    let d = max - min;
    if d > 0. { (min - 0.1 * d, max + 0.1 * d) }
    else { (min - 1., max + 1.) }
}

impl Window {
    /// Return a window enclosing all the finite `points`, with a
    /// margin of a tenth of the extent of the points along each axis.
    /// An axis on which all points coincide is given a margin of 1.
    /// Non-finite points are ignored; if no point remains, return the
    /// default window.
    ///
    /// # Example
    ///
    /// ```
    /// use xy_sampling::Window;
    /// let w = Window::infer([[0., 0.], [10., 5.], [f64::NAN, 1.]]);
    /// assert_eq!(w, Window::new(-1., 11., -0.5, 5.5).unwrap());
    /// ```
    pub fn infer<I>(points: I) -> Window
    where I: IntoIterator<Item = [f64; 2]> {
        let mut bb: Option<Window> = None;
        for [x, y] in points {
            if !(x.is_finite() && y.is_finite()) { continue }
            match &mut bb {
                Some(w) => {
                    w.xmin = w.xmin.min(x);
                    w.xmax = w.xmax.max(x);
                    w.ymin = w.ymin.min(y);
                    w.ymax = w.ymax.max(y);
                }
                None => bb = Some(Window { xmin: x, xmax: x, ymin: y, ymax: y }),
            }
        }
        match bb {
            Some(w) => {
                let (xmin, xmax) = widen(w.xmin, w.xmax);
                let (ymin, ymax) = widen(w.ymin, w.ymax);
                Window { xmin, xmax, ymin, ymax }
            }
            None => Window::default(),
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::{Sampling, Window};

    #[test]
    fn margins() {
        let w = Window::infer([[-1., 2.], [1., 4.], [0., 3.]]);
        assert!((w.xmin + 1.2).abs() < 1e-12 && (w.xmax - 1.2).abs() < 1e-12);
        assert!((w.ymin - 1.8).abs() < 1e-12 && (w.ymax - 4.2).abs() < 1e-12);
        assert!(w.check().is_ok());
    }

    #[test]
    fn degenerate_axis() {
        let w = Window::infer([[3., 5.], [3., 7.]]);
        assert_eq!((w.xmin, w.xmax), (2., 4.));
        let w = Window::infer([[1., 1.]]);
        assert_eq!(w, Window { xmin: 0., xmax: 2., ymin: 0., ymax: 2. });
    }

    #[test]
    fn no_finite_point() {
        assert_eq!(Window::infer(Vec::<[f64; 2]>::new()), Window::default());
        let w = Window::infer([[f64::NAN, 0.], [0., f64::INFINITY]]);
        assert_eq!(w, Window::default());
    }

    #[test]
    fn from_sampling() {
        let s = Sampling::from([vec![[0., 0.], [10., 10.]]]);
        let w = Window::infer(s.iter().flatten());
        assert_eq!(w, Window::new(-1., 11., -1., 11.).unwrap());
    }
}
