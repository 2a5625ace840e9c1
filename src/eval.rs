//! Evaluation of the sampled function, with failures made explicit.

use std::fmt::Display;
use log::trace;
use crate::{Window,
            error::{EvalError, Result},
            scale::{Scaler, clamp}};

/// Values that a sampled function may return.  A value is usable
/// only if it converts to a finite real number; anything else is a
/// hole in the graph.
pub trait Value {
    fn into_real(self) -> std::result::Result<f64, EvalError>;
}

impl Value for f64 {
    #[inline]
    fn into_real(self) -> std::result::Result<f64, EvalError> {
        if self.is_finite() { Ok(self) } else { Err(EvalError::NotFinite(self)) }
    }
}

impl Value for f32 {
    #[inline]
    fn into_real(self) -> std::result::Result<f64, EvalError> {
        (self as f64).into_real()
    }
}

impl<T: Value> Value for Option<T> {
    #[inline]
    fn into_real(self) -> std::result::Result<f64, EvalError> {
        match self {
            Some(v) => v.into_real(),
            None => Err(EvalError::Undefined),
        }
    }
}

impl<T: Value, E: Display> Value for std::result::Result<T, E> {
    #[inline]
    fn into_real(self) -> std::result::Result<f64, EvalError> {
        match self {
            Ok(v) => v.into_real(),
            Err(e) => Err(EvalError::Failed(e.to_string())),
        }
    }
}


/// A point `(x, f(x))` together with its pixel coordinates.  `y` and
/// `py` are `None` when `f(x)` is unusable or out of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SampleCoord {
    pub x: f64,
    pub y: Option<f64>,
    pub px: i64,
    pub py: Option<i64>,
}

impl SampleCoord {
    #[inline]
    pub fn is_valid(&self) -> bool { self.py.is_some() }
}

/// Outcome of the evaluation at a pixel column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Column {
    Invalid,
    InRange(SampleCoord),
    /// The value was outside \[`ymin`, `ymax`\] and was moved to the
    /// nearest bound.
    Clamped(SampleCoord),
}

/// The function under study, seen through the window and the pixel
/// space.  Counts the evaluations.
pub(crate) struct Evaluator<'a> {
    f: &'a mut dyn FnMut(f64) -> std::result::Result<f64, EvalError>,
    window: Window,
    width: usize,
    height: usize,
    pixel_to_x: Scaler,
    x_to_pixel: Scaler,
    y_to_pixel: Scaler,
    evaluations: usize,
    max_evaluations: usize,
}

impl<'a> Evaluator<'a> {
    /// Assume `window` and the pixel dimensions were validated.
    pub fn new(f: &'a mut dyn FnMut(f64) -> std::result::Result<f64, EvalError>,
               window: Window, width: usize, height: usize,
               max_evaluations: usize) -> Result<Self> {
        let w1 = (width - 1) as f64;
        let h1 = (height - 1) as f64;
        Ok(Evaluator {
            f, window, width, height,
            pixel_to_x: Scaler::new(0., w1, window.xmin, window.xmax)?,
            x_to_pixel: Scaler::new(window.xmin, window.xmax, 0., w1)?,
            // Pixel rows grow downwards.
            y_to_pixel: Scaler::new(window.ymin, window.ymax, h1, 0.)?,
            evaluations: 0,
            max_evaluations,
        })
    }

    #[inline]
    pub fn window(&self) -> Window { self.window }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    #[inline]
    pub fn evaluations(&self) -> usize { self.evaluations }

    /// `true` if the evaluation budget is spent.
    #[inline]
    pub fn exhausted(&self) -> bool { self.evaluations >= self.max_evaluations }

    fn eval(&mut self, x: f64) -> std::result::Result<f64, EvalError> {
        self.evaluations += 1;
        let y = (self.f)(x);
        if let Err(e) = &y {
            trace!("f({:e}): {}", x, e);
        }
        y
    }

    #[inline]
    fn column_of(&self, x: f64) -> i64 {
        clamp(self.x_to_pixel.apply_floor(x), 0, self.width as i64 - 1)
    }

    #[inline]
    fn row_of(&self, y: f64) -> i64 {
        clamp(self.y_to_pixel.apply_floor(y), 0, self.height as i64 - 1)
    }

    #[inline]
    fn in_range(&self, y: f64) -> bool {
        self.window.ymin <= y && y <= self.window.ymax
    }

    /// Evaluate `f` at `x`.  Values outside of the window are invalid.
    pub fn point(&mut self, x: f64) -> SampleCoord {
        let px = self.column_of(x);
        match self.eval(x) {
            Ok(y) if self.in_range(y) => {
                SampleCoord { x, y: Some(y), px, py: Some(self.row_of(y)) }
            }
            _ => SampleCoord { x, y: None, px, py: None },
        }
    }

    /// Evaluate `f` at the abscissa of the pixel column `i`.
    pub fn column(&mut self, i: usize) -> Column {
        let x = self.pixel_to_x.apply(i as f64);
        let px = i as i64;
        match self.eval(x) {
            Ok(y) if self.in_range(y) => Column::InRange(
                SampleCoord { x, y: Some(y), px, py: Some(self.row_of(y)) }),
            Ok(y) => {
                let y = clamp(y, self.window.ymin, self.window.ymax);
                Column::Clamped(
                    SampleCoord { x, y: Some(y), px, py: Some(self.row_of(y)) })
            }
            Err(_) => Column::Invalid,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{Column, Evaluator, Value};
    use crate::{EvalError, Window};

    #[test]
    fn values() {
        assert_eq!(1.5f64.into_real(), Ok(1.5));
        assert_eq!(2f32.into_real(), Ok(2.));
        assert!(f64::NAN.into_real().is_err());
        assert_eq!(f64::INFINITY.into_real(), Err(EvalError::NotFinite(f64::INFINITY)));
        assert_eq!(None::<f64>.into_real(), Err(EvalError::Undefined));
        assert_eq!(Some(3f64).into_real(), Ok(3.));
        let r: Result<f64, String> = Err("domain error".to_string());
        assert_eq!(r.into_real(), Err(EvalError::Failed("domain error".into())));
        let r: Result<Option<f64>, &str> = Ok(None);
        assert_eq!(r.into_real(), Err(EvalError::Undefined));
    }

    #[test]
    fn pixels() {
        let w = Window::new(-10., 10., -10., 10.).unwrap();
        let mut f = |x: f64| (2. * x).into_real();
        let mut ev = Evaluator::new(&mut f, w, 401, 401, 1000).unwrap();
        let p = ev.point(0.);
        assert_eq!((p.px, p.py), (200, Some(200)));
        let p = ev.point(10.);
        assert_eq!((p.px, p.py, p.y), (400, None, None));
        let p = ev.point(-2.5);
        assert_eq!((p.px, p.py), (150, Some(300)));
        assert_eq!(ev.evaluations(), 3);
    }

    #[test]
    fn columns() {
        let w = Window::new(0., 4., 0., 1.).unwrap();
        let mut f = |x: f64| {
            let y: Result<f64, String> =
                if x < 1. { Err("neg".to_string()) } else { Ok(x - 2.) };
            y.into_real()
        };
        let mut ev = Evaluator::new(&mut f, w, 5, 11, 1000).unwrap();
        assert_eq!(ev.column(0), Column::Invalid);
        match ev.column(1) {
            Column::Clamped(p) => assert_eq!((p.x, p.y, p.py), (1., Some(0.), Some(10))),
            c => panic!("{:?}", c),
        }
        match ev.column(2) {
            Column::InRange(p) => assert_eq!((p.px, p.py), (2, Some(10))),
            c => panic!("{:?}", c),
        }
        match ev.column(4) {
            Column::Clamped(p) => assert_eq!((p.y, p.py), (Some(1.), Some(0))),
            c => panic!("{:?}", c),
        }
        assert!(!ev.exhausted());
    }
}
