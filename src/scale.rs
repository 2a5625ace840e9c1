//! Mapping between the domain of the function and pixel space.

use crate::error::{Error, Result};

/// Affine map sending \[`old_low`, `old_high`\] onto
/// \[`new_low`, `new_high`\].  The target interval may be reversed
/// (this is how the y-axis gets flipped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scaler {
    old_low: f64,
    old_range: f64,
    new_low: f64,
    new_range: f64,
}

impl Scaler {
    /// Return the scaler or an error if \[`old_low`, `old_high`\] is
    /// reduced to a point (or is not a proper interval at all).
    pub fn new(old_low: f64, old_high: f64,
               new_low: f64, new_high: f64) -> Result<Self> {
        let old_range = old_high - old_low;
        if old_range == 0. || !old_range.is_finite() {
            return Err(Error::DegenerateInterval { low: old_low,
                                                   high: old_high })
        }
        Ok(Scaler { old_low, old_range,
                    new_low, new_range: new_high - new_low })
    }

    /// Image of `k`.
    #[inline]
    pub fn apply(&self, k: f64) -> f64 {
        self.new_low + (k - self.old_low) / self.old_range * self.new_range
    }

    /// Image of `k` truncated (floored) to an integer pixel.
    #[inline]
    pub fn apply_floor(&self, k: f64) -> i64 {
        self.apply(k).floor() as i64
    }

    /// The inverse map.
    pub fn inverse(&self) -> Result<Self> {
        Scaler::new(self.new_low, self.new_low + self.new_range,
                    self.old_low, self.old_low + self.old_range)
    }
}

/// Return `lo` if `k < lo`, `hi` if `k > hi` and `k` otherwise.
/// Unlike [`f64::clamp`], this never panics (`lo > hi` simply
/// favours `lo`) and a NaN `k` is returned untouched.
#[inline]
pub fn clamp<T: PartialOrd>(k: T, lo: T, hi: T) -> T {
    if k < lo { lo }
    else if k > hi { hi }
    else { k }
}
