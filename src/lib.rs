//! Adaptive sampling of the graph of a function `f: ℝ → ℝ` for
//! display in a window of a given pixel size.
//!
//! The function may be undefined or fail anywhere, have jumps or
//! vertical asymptotes.  The result is a list of polylines, each one
//! continuous at the pixel level, obtained in three steps:
//!
//! 1. `f` is evaluated at every pixel column and the usable values
//!    are grouped into runs;
//! 2. each run is refined by bisection until consecutive points are
//!    at most one pixel apart, with a bounded effort inside a single
//!    pixel column;
//! 3. the refined points are cut into polylines wherever they are
//!    more than a pixel apart.
//!
//! # Example
//!
//! ```
//! use xy_sampling::{Sampling, Window};
//! # fn main() -> Result<(), xy_sampling::Error> {
//! let w = Window::new(-10., 10., -10., 10.)?;
//! let s = Sampling::xy(|x: f64| 1. / x, w).build()?;
//! assert_eq!(s.len(), 2); // One polyline on each side of 0.
//! # Ok(()) }
//! ```

use std::{fmt::{self, Display, Formatter},
          io::{self, Write}};
use log::debug;
use rgb::*;

mod error;
mod scale;
mod occupancy;
mod eval;
mod rough;
mod refine;
mod assemble;
mod bounds;

pub use error::{Error, EvalError, Result};
pub use scale::{Scaler, clamp};
pub use occupancy::{Fenwick, OccupancyTable};
pub use eval::Value;

use eval::{Evaluator, SampleCoord};

/// A window \[`xmin`, `xmax`\] × \[`ymin`, `ymax`\].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Window {
    /// Return the window \[`xmin`, `xmax`\] × \[`ymin`, `ymax`\] or an
    /// error if its interior is empty or it is not finite.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        let w = Window { xmin, xmax, ymin, ymax };
        w.check()?;
        Ok(w)
    }

    /// Return `true` if the window has an empty interior.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.xmin < self.xmax && self.ymin < self.ymax) // NAN ⟹ empty
    }

    /// Check that the window can be used to sample a function.
    pub fn check(&self) -> Result<()> {
        if self.is_empty() || !self.xmin.is_finite() || !self.xmax.is_finite()
            || !self.ymin.is_finite() || !self.ymax.is_finite() {
            return Err(Error::InvalidWindow { xmin: self.xmin, xmax: self.xmax,
                                              ymin: self.ymin, ymax: self.ymax })
        }
        Ok(())
    }

    /// Return `true` if the point `p` belongs to the window (possibly
    /// on the boundary).
    #[inline]
    pub fn contains(&self, [x, y]: [f64; 2]) -> bool {
        self.xmin <= x && x <= self.xmax && self.ymin <= y && y <= self.ymax
    }
}

impl Default for Window {
    /// The window \[-10, 10\] × \[-10, 10\].
    fn default() -> Self {
        Window { xmin: -10., xmax: 10., ymin: -10., ymax: 10. }
    }
}


////////////////////////////////////////////////////////////////////////
//
// Sampling

/// Coordinates of the points of a [`Sampling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Coordinates {
    /// Integer pixel coordinates, the origin being the top left
    /// corner of the window.
    #[default]
    Pixel,
    /// The points `(x, f(x))` of the refined trace.
    Domain,
    /// The points `(x, f(x))` of the uniform (one per pixel column)
    /// sampling, grouped along the polylines of the refined trace.
    RoughDomain,
}

/// A sampling of the graph of a function: a list of polylines, each
/// with at least 2 points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sampling {
    lines: Vec<Vec<[f64; 2]>>,
    evaluations: usize,
}

impl Sampling {
    /// Return `true` if the sampling has no polyline.
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    /// Return the number of polylines.
    pub fn len(&self) -> usize { self.lines.len() }

    /// The polylines of the sampling.
    pub fn polylines(&self) -> &[Vec<[f64; 2]>] { &self.lines }

    /// Consume the sampling and return its polylines.
    pub fn into_polylines(self) -> Vec<Vec<[f64; 2]>> { self.lines }

    /// Number of evaluations of the function performed to build the
    /// sampling.
    pub fn evaluations(&self) -> usize { self.evaluations }

    /// Iterate on the points (and cuts) of the path.  More
    /// precisely, a path is made of continuous segments whose
    /// points are given by contiguous values `Some(p)`
    /// interspaced by `None`.  Two `None` never follow each
    /// other and the path neither starts nor ends with `None`.
    pub fn iter(&self) -> Iter<'_> {
        Iter { lines: self.lines.iter(),  points: [].iter(),
               started: false }
    }

    /// Return the smallest rectangle enclosing all the points of the
    /// sampling `self`.  If the path is empty, the "min" fields of
    /// the window are set to +∞ and "max" fields to -∞.
    pub fn bounding_box(&self) -> Window {
        let mut bb = Window {
            xmin: f64::INFINITY,  xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,  ymax: f64::NEG_INFINITY };
        for [x, y] in self.iter().flatten() {
            if x < bb.xmin { bb.xmin = x }
            if bb.xmax < x { bb.xmax = x }
            if y < bb.ymin { bb.ymin = y }
            if bb.ymax < y { bb.ymax = y }
        }
        bb
    }
}

/// Iterator on the points of the [`Sampling`].
/// See [`Sampling::iter`] for more information.
pub struct Iter<'a> {
    lines: std::slice::Iter<'a, Vec<[f64; 2]>>,
    points: std::slice::Iter<'a, [f64; 2]>,
    started: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = Option<[f64; 2]>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(&p) = self.points.next() {
            return Some(Some(p))
        }
        let line = self.lines.next()?;
        self.points = line.iter();
        if self.started {
            Some(None)
        } else {
            self.started = true;
            self.points.next().map(|&p| Some(p))
        }
    }
}

impl<T> From<T> for Sampling
where T: IntoIterator<Item = Vec<[f64; 2]>> {
    /// Sampling made of the given polylines.  Polylines with less
    /// than two points are ignored.
    fn from(lines: T) -> Self {
        let lines = lines.into_iter().filter(|l| l.len() >= 2).collect();
        Sampling { lines, evaluations: 0 }
    }
}


////////////////////////////////////////////////////////////////////////
//
// Options

const DEFAULT_WIDTH: usize = 401;
const DEFAULT_HEIGHT: usize = 401;
const DEFAULT_MAX_FILL_DEPTH: u32 = 15;
const DEFAULT_DELTA_DIVISOR: f64 = 1000.;

/// Default evaluation budget: a few bisection levels per pixel column
/// and per doubling of the number of pixel rows.
fn default_max_evaluations(width: usize, height: usize) -> usize {
    let log_h = usize::BITS - height.leading_zeros(); // ⌈log₂⌉ or more
    32 * width * (log_h as usize + 1)
}

impl Sampling {
    /// Create a sampling of the graph of `f` in the window `w`.  The
    /// function may return any [`Value`], in particular `f64` (NaN
    /// and infinities mean "undefined"), `Option<f64>` and
    /// `Result<f64, E>`.
    ///
    /// # Example
    ///
    /// ```
    /// use std::fs::File;
    /// use xy_sampling::{Sampling, Window};
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let w = Window::new(-5., 5., -1.5, 1.5)?;
    /// let s = Sampling::xy(|x: f64| x.sin(), w).width(200).build()?;
    /// s.write(&mut File::create("target/xy.dat")?)?;
    /// # Ok(()) }
    /// ```
    #[must_use]
    pub fn xy<F, V>(f: F, w: Window) -> Xy<F>
    where F: FnMut(f64) -> V,
          V: Value {
        Xy { f,  window: w,
             width: DEFAULT_WIDTH,
             height: DEFAULT_HEIGHT,
             max_fill_depth: DEFAULT_MAX_FILL_DEPTH,
             delta_divisor: DEFAULT_DELTA_DIVISOR,
             max_evaluations: None,
             coordinates: Coordinates::Pixel }
    }
}

/// Options for sampling the graph of a function.  See [`Sampling::xy`].
pub struct Xy<F> {
    f: F,
    window: Window,
    width: usize,
    height: usize,
    max_fill_depth: u32,
    delta_divisor: f64,
    max_evaluations: Option<usize>,
    coordinates: Coordinates,
}

impl<F> Xy<F> {
    /// Set the width of the window in pixels.  Default: 401.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the height of the window in pixels.  Default: 401.
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Maximum number of bisections performed inside a single pixel
    /// column (close to a vertical asymptote).  Default: 15.
    pub fn max_fill_depth(mut self, depth: u32) -> Self {
        self.max_fill_depth = depth;
        self
    }

    /// Two abscissas closer than `(xmax - xmin) / (width * d)` are
    /// considered equal, so a jump that narrow is not refined any
    /// further.  Panic if `d` is not positive and finite.
    /// Default: 1000.
    pub fn delta_divisor(mut self, d: f64) -> Self {
        if !(d > 0. && d.is_finite()) {
            panic!("xy_sampling: delta_divisor = {} must be positive \
                    and finite", d)
        }
        self.delta_divisor = d;
        self
    }

    /// Set the maximum number of evaluations of the function.  The
    /// uniform pass (two evaluations per pixel column) is always
    /// performed, the refinement stops when the budget is spent.
    /// Default: `32 * width * (⌈log₂ height⌉ + 1)`.
    pub fn max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    /// Choose the coordinates of the returned points.
    /// Default: [`Coordinates::Pixel`].
    pub fn coordinates(mut self, c: Coordinates) -> Self {
        self.coordinates = c;
        self
    }
}

impl<F, V> Xy<F>
where F: FnMut(f64) -> V,
      V: Value {
    /// Return the sampling or an error if the window or the pixel
    /// dimensions are invalid.  In case of error, the function is
    /// never evaluated.
    pub fn build(&mut self) -> Result<Sampling> {
        self.window.check()?;
        let (width, height) = (self.width, self.height);
        if width < 2 || height < 2 {
            return Err(Error::InvalidPixelSpace { width, height })
        }
        let max_evaluations = self.max_evaluations
            .unwrap_or_else(|| default_max_evaluations(width, height));
        let f = &mut self.f;
        let mut eval = |x: f64| f(x).into_real();
        let mut ev = Evaluator::new(&mut eval, self.window, width, height,
                                    max_evaluations)?;
        let runs = rough::sample(&mut ev);
        debug!("uniform pass: {} runs, {} evaluations",
               runs.len(), ev.evaluations());
        let points = refine::Bisector::new(
            &mut ev, self.delta_divisor, self.max_fill_depth).run(&runs)?;
        let lines = assemble::assemble(&points, height);
        let mut lines: Vec<Vec<[f64; 2]>> = match self.coordinates {
            Coordinates::Pixel => lines.iter().map(|l| pixels(l)).collect(),
            Coordinates::Domain => lines.iter().map(|l| values(l)).collect(),
            Coordinates::RoughDomain => assemble::reproject(&lines, &runs)
                .iter().map(|l| values(l)).collect(),
        };
        // Distinct points may share a pixel.
        lines.retain(|l| l.len() >= 2);
        debug!("{} polylines, {} evaluations", lines.len(), ev.evaluations());
        Ok(Sampling { lines, evaluations: ev.evaluations() })
    }
}

/// Pixel coordinates of the line (without repeated pixels).
fn pixels(line: &[SampleCoord]) -> Vec<[f64; 2]> {
    let mut l: Vec<[f64; 2]> = line.iter()
        .filter_map(|p| p.py.map(|py| [p.px as f64, py as f64]))
        .collect();
    l.dedup();
    l
}

fn values(line: &[SampleCoord]) -> Vec<[f64; 2]> {
    line.iter().filter_map(|p| p.y.map(|y| [p.x, y])).collect()
}


////////////////////////////////////////////////////////////////////////
//
// Output

/// LaTeX output.
///
/// # Example
///
/// ```
/// use std::fs::File;
/// use xy_sampling::Sampling;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let s = Sampling::from([vec![[0., 0.], [1., 1.]]]);
/// s.latex().write(&mut File::create("target/sampling.tex")?)?;
/// # Ok(()) }
/// ```
pub struct LaTeX<'a> {
    sampling: &'a Sampling,
    n: usize,
    color: Option<RGB8>,
}

impl<'a> LaTeX<'a> {
    #[inline]
    fn new(s: &'a Sampling) -> Self {
        Self { sampling: s,  n: 20_000,  color: None }
    }

    /// Set the maximum number of points of a PGF path to `n`.  If it
    /// contains more than `n` points, the sampling curve is drawn as
    /// several PGF paths.  Default: 20_000.
    pub fn n(&mut self, n: usize) -> &mut Self {
        self.n = n;
        self
    }

    /// Set the color of the curve to `color`.  If not specified the
    /// active LaTeX color will be used.
    pub fn color(&mut self, color: RGB8) -> &mut Self {
        self.color = Some(color);
        self
    }

    /// Write the sampling to the formatter as PGF/TikZ commands.
    pub fn write(&self, f: &mut impl Write) -> io::Result<()> {
        writeln!(f, "% Written by the Rust xy_sampling crate.")?;
        writeln!(f, "\\begin{{pgfscope}}")?;
        if let Some(RGB8 {r, g, b}) = self.color {
            writeln!(f, "\\definecolor{{RustXYSamplingColor}}{{RGB}}\
                         {{{},{},{}}}\n\
                         \\pgfsetstrokecolor{{RustXYSamplingColor}}",
                     r, g, b)?;
        }
        for line in self.sampling.polylines() {
            let mut n = 0;
            for (i, [x, y]) in line.iter().enumerate() {
                n += 1;
                if i == 0 {
                    writeln!(f, "\\pgfpathmoveto{{\\pgfpointxy\
                                 {{{:.16}}}{{{:.16}}}}}", x, y)?
                } else if n >= self.n {
                    writeln!(f, "\\pgfpathlineto{{\\pgfpointxy\
                                 {{{:.16}}}{{{:.16}}}}}\n\
                                 \\pgfusepath{{stroke}}\n\
                                 \\pgfpathmoveto{{\\pgfpointxy\
                                 {{{:.16}}}{{{:.16}}}}}", x, y, x, y)?;
                    n = 0;
                } else {
                    writeln!(f, "\\pgfpathlineto{{\\pgfpointxy\
                                 {{{:.16}}}{{{:.16}}}}}", x, y)?
                }
            }
            writeln!(f, "\\pgfusepath{{stroke}}")?;
        }
        writeln!(f, "\\end{{pgfscope}}")
    }
}

/// # Output
impl Sampling {
    /// Write the sampling `self` using PGF/TikZ commands.
    pub fn latex(&self) -> LaTeX<'_> { LaTeX::new(self) }

    /// Write the sampling to `f` in a tabular form: each point is
    /// written as "x y" on a single line (in scientific notation).
    /// Polylines are separated by a blank line.  This format is
    /// compatible with Gnuplot.
    pub fn write(&self, f: &mut impl Write) -> io::Result<()> {
        for p in self.iter() {
            match p {
                Some([x, y]) => writeln!(f, "{:e} {:e}", x, y)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

impl Display for Sampling {
    /// Display the sampling in a tabular form: each point is written
    /// as "x y" on a single line (in scientific notation).
    /// Polylines are separated by a blank line.  This format is
    /// compatible with Gnuplot.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for p in self.iter() {
            match p {
                Some([x, y]) => writeln!(f, "{:e} {:e}", x, y)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
//
// Tests
