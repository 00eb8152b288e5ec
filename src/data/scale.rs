//! Continuous scales mapping data values to pixel positions.
//!
//! These follow the usual charting conventions: a scale has a `domain` (data
//! space) and a `range` (pixel space), may be *niced* so the domain ends on round
//! tick values, may *clamp* out-of-domain inputs to the range, and may *round*
//! its output to whole pixels.

use chrono::{DateTime, Utc};

/// Linear mapping `domain → range`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
    pub round: bool,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            round: false,
        }
    }
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            ..Default::default()
        }
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Extend the domain so both ends fall on multiples of a round tick step.
    ///
    /// ```
    /// # use capdash::data::scale::LinearScale;
    /// let s = LinearScale::new((0.13, 0.87), (0.0, 100.0)).nice(10);
    /// assert_eq!(s.domain, (0.1, 0.9));
    /// ```
    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(start.is_finite() && stop.is_finite()) || start == stop {
            return self;
        }
        let reversed = stop < start;
        if reversed {
            std::mem::swap(&mut start, &mut stop);
        }
        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = Some(step);
        }
        self.domain = if reversed { (stop, start) } else { (start, stop) };
        self
    }

    /// Map a domain value to the range.
    ///
    /// A degenerate domain (both ends equal) maps everything to the middle of the range.
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let mut t = if d1 == d0 { 0.5 } else { (v - d0) / (d1 - d0) };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        let out = r0 + t * (r1 - r0);
        if self.round {
            out.round()
        } else {
            out
        }
    }

    /// Map a range value back into the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let mut t = if r1 == r0 { 0.5 } else { (px - r0) / (r1 - r0) };
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        d0 + t * (d1 - d0)
    }
}

/// Round step size giving roughly `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results encode `1 / -step`
/// for sub-unit steps, which keeps the arithmetic exact for decimal fractions.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

/// Scale over instants, stored internally as UNIX seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Domain given in UNIX seconds.
    pub fn new(domain_secs: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new(domain_secs, range),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.inner.range
    }

    pub fn map(&self, t_secs: f64) -> f64 {
        self.inner.map(t_secs)
    }

    pub fn map_datetime(&self, t: DateTime<Utc>) -> f64 {
        self.inner.map(t.timestamp_millis() as f64 / 1000.0)
    }

    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }
}
