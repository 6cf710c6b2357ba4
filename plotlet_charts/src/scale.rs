// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear and band scales.
//!
//! A scale is a pure mapping from data values to range (pixel) values. Specs carry the
//! domain and options; instantiating a spec against a range yields the concrete scale.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use plotlet_core::TableData;

/// Default approximate tick count used for "nice" rounding.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Discrete band scale.
    Band(ScaleBandSpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleBandSpec> for ScaleSpec {
    fn from(value: ScaleBandSpec) -> Self {
        Self::Band(value)
    }
}

/// A linear mapping from a continuous domain to a continuous range.
///
/// A scale without a domain (built from no finite values) is *degenerate*: it maps every
/// value to the start of the range and produces no ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: Option<(f64, f64)>,
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain: Some(domain),
            range,
        }
    }

    /// Creates a degenerate scale that maps everything to `range.0`.
    pub fn degenerate(range: (f64, f64)) -> Self {
        Self {
            domain: None,
            range,
        }
    }

    /// Returns `false` for a degenerate scale.
    pub fn is_defined(&self) -> bool {
        self.domain.is_some()
    }

    /// Returns the domain, or `None` for a degenerate scale.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.domain
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps a value from domain space into range space.
    ///
    /// Values outside the domain extrapolate; nothing is clamped. A zero-width domain maps
    /// every value to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        let Some((d0, d1)) = self.domain else {
            return r0;
        };
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.5 * (r0 + r1);
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, px: f64) -> Option<f64> {
        let (d0, d1) = self.domain?;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return Some(0.5 * (d0 + d1));
        }
        Some(d0 + (px - r0) / denom * (d1 - d0))
    }

    /// Returns “nice” tick values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self.domain {
            Some((d0, d1)) => nice_ticks(d0, d1, count),
            None => Vec::new(),
        }
    }

    /// Returns the spacing between the values returned by [`ScaleLinear::ticks`].
    ///
    /// Returns `0.0` when there is at most one tick.
    pub fn tick_step(&self, count: usize) -> f64 {
        self.domain
            .and_then(|(d0, d1)| NiceStep::new(d0.min(d1), d0.max(d1), count))
            .map_or(0.0, NiceStep::value)
    }
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units; `None` when no finite data was available.
    pub domain: Option<(f64, f64)>,
    /// Whether to round the domain outward to tick multiples.
    pub nice: bool,
    /// Whether to extend the domain so it includes zero.
    pub zero: bool,
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain: Some(domain),
            nice: false,
            zero: false,
        }
    }

    /// Creates a spec with no domain (a degenerate scale).
    pub fn empty() -> Self {
        Self {
            domain: None,
            nice: false,
            zero: false,
        }
    }

    /// Creates a spec whose domain is the extent of the finite `values`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            domain: extent(values),
            ..Self::empty()
        }
    }

    /// Creates a spec whose domain is the extent of a numeric field.
    pub fn from_data(data: &dyn TableData, field: &str) -> Self {
        Self {
            domain: infer_domain_f64(data, field),
            ..Self::empty()
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Enables or disables including zero in the domain.
    pub fn with_zero(mut self, zero: bool) -> Self {
        self.zero = zero;
        self
    }

    /// Returns `true` if a domain is set.
    pub fn is_defined(&self) -> bool {
        self.domain.is_some()
    }

    /// Returns the effective domain after applying `zero` and `nice`.
    ///
    /// The result is ordered (`min <= max`) and always contains the authored domain.
    pub fn resolved_domain(&self, tick_count: usize) -> Option<(f64, f64)> {
        let (mut lo, mut hi) = self.domain?;
        if lo > hi {
            core::mem::swap(&mut lo, &mut hi);
        }
        if self.zero {
            lo = lo.min(0.0);
            hi = hi.max(0.0);
        }
        if self.nice {
            Some(nice_domain(lo, hi, tick_count))
        } else {
            Some((lo, hi))
        }
    }

    /// Instantiates a concrete scale for `range`, using the domain as authored.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        match self.domain {
            Some(domain) => ScaleLinear::new(domain, range),
            None => ScaleLinear::degenerate(range),
        }
    }

    /// Instantiates a concrete scale using the [`resolved_domain`](Self::resolved_domain).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        match self.resolved_domain(tick_count) {
            Some(domain) => ScaleLinear::new(domain, range),
            None => ScaleLinear::degenerate(range),
        }
    }
}

/// Builds a nice-rounded linear scale over the extent of `values`.
///
/// Non-finite values are ignored. With no finite values the result is degenerate.
pub fn build_continuous_scale(
    values: impl IntoIterator<Item = f64>,
    range: (f64, f64),
) -> ScaleLinear {
    ScaleLinearSpec::from_values(values)
        .with_nice(true)
        .instantiate_resolved(range, DEFAULT_TICK_COUNT)
}

/// A tick step of `factor * 10^power`, with `factor` one of 1, 2 or 5.
///
/// Steps below 1 are applied through their exact reciprocal (10, 5, 2, 100, ...) so
/// multiples such as `3 / 10` come out as the nearest float to `0.3`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct NiceStep {
    power: i32,
    factor: f64,
}

impl NiceStep {
    fn new(min: f64, max: f64, count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            return None;
        }
        let raw = span / count as f64;
        let mut power = {
            let p = raw.log10().floor().clamp(-300.0, 300.0);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to +/-300")]
            {
                p as i32
            }
        };
        let error = raw / 10_f64.powi(power);
        let factor = if error >= 7.5 {
            power += 1;
            1.0
        } else if error >= 3.5 {
            5.0
        } else if error >= 1.5 {
            2.0
        } else {
            1.0
        };
        Some(Self { power, factor })
    }

    fn value(self) -> f64 {
        if self.power >= 0 {
            self.factor * 10_f64.powi(self.power)
        } else {
            1.0 / self.inverse()
        }
    }

    fn inverse(self) -> f64 {
        10_f64.powi(-self.power) / self.factor
    }

    fn multiple(self, k: f64) -> f64 {
        if self.power >= 0 {
            k * self.value()
        } else {
            k / self.inverse()
        }
    }

    fn index(self, v: f64) -> f64 {
        if self.power >= 0 {
            v / self.value()
        } else {
            v * self.inverse()
        }
    }

    fn index_floor(self, v: f64) -> f64 {
        let k = self.index(v);
        let r = k.round();
        if near(k, r) { r } else { k.floor() }
    }

    fn index_ceil(self, v: f64) -> f64 {
        let k = self.index(v);
        let r = k.round();
        if near(k, r) { r } else { k.ceil() }
    }
}

fn near(k: f64, r: f64) -> bool {
    (k - r).abs() <= 1e-9 * r.abs().max(1.0)
}

fn nice_domain(mut start: f64, mut stop: f64, count: usize) -> (f64, f64) {
    let mut previous: Option<NiceStep> = None;
    // Widening can change the step; iterate until it settles.
    for _ in 0..10 {
        let Some(step) = NiceStep::new(start, stop, count) else {
            break;
        };
        if previous == Some(step) {
            break;
        }
        start = step.multiple(step.index_floor(start));
        stop = step.multiple(step.index_ceil(stop));
        previous = Some(step);
    }
    (start, stop)
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let Some(step) = NiceStep::new(min, max, count) else {
        return alloc::vec![min, max];
    };

    let first = step.index_ceil(min);
    let last = step.index_floor(max);
    let n_f = last - first;
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        return Vec::new();
    };
    (0..=n).map(|i| step.multiple(first + i as f64)).collect()
}

fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        if !v.is_finite() {
            continue;
        }
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Infers a `(min, max)` domain for a numeric field.
///
/// Missing, non-numeric and non-finite values are ignored. Returns `None` if no finite
/// values are present.
pub fn infer_domain_f64(data: &dyn TableData, field: &str) -> Option<(f64, f64)> {
    extent((0..data.row_count()).filter_map(|row| data.f64(row, field)))
}

/// A discrete band scale for categorical axes.
///
/// The range is split into `count` equal steps. Each step holds one drawn band plus
/// inner padding; outer padding is added before the first and after the last band.
/// Padding is expressed as a fraction of the step. Labels are addressed by index, so
/// repeated labels still get distinct bands.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand {
    labels: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (labels + padding, no range yet).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBandSpec {
    /// Ordered category labels.
    pub labels: Vec<String>,
    /// Inner padding as a fraction of the step.
    pub padding_inner: f64,
    /// Outer padding as a fraction of the step.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale over `range` with the default padding of `0.1`.
    pub fn new(labels: Vec<String>, range: (f64, f64)) -> Self {
        Self {
            labels,
            range,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding to the same fraction.
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Sets the inner padding, clamped to `[0, 1]`.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self
    }

    /// Sets the outer padding, clamped to be non-negative.
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    /// Returns the labels in band order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.count() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let span = (self.range.1 - self.range.0).abs();
        span / (n - self.padding_inner + 2.0 * self.padding_outer).max(1.0)
    }

    /// Returns the drawn width of each band.
    pub fn band_width(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start position of the band at `index`.
    ///
    /// For a reversed range (`range.1 < range.0`) the first label sits at the high end.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let n = self.count() as f64;
        let lo = r0.min(r1);
        let span = (r1 - r0).abs();
        let step = self.step();
        let start = lo + (span - step * (n - self.padding_inner)) * 0.5;
        let slot = if r1 < r0 {
            n - 1.0 - index as f64
        } else {
            index as f64
        };
        start + step * slot
    }

    /// Returns the center of the band at `index`.
    pub fn center(&self, index: usize) -> f64 {
        self.x(index) + 0.5 * self.band_width()
    }

    /// Returns the index of the first band labelled `label`.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Returns the start position of the first band labelled `label`.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.x(i))
    }
}

impl ScaleBandSpec {
    /// Creates a new band scale spec with the default padding of `0.1`.
    pub fn new<S: Into<String>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding to the same fraction.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.labels.len()
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(self.labels.clone(), range)
            .with_padding_inner(self.padding_inner)
            .with_padding_outer(self.padding_outer)
    }
}

/// Builds a band scale over `categories` with equal inner and outer `padding`.
pub fn build_band_scale<S: Into<String>>(
    categories: impl IntoIterator<Item = S>,
    range: (f64, f64),
    padding: f64,
) -> ScaleBand {
    ScaleBandSpec::new(categories)
        .with_padding(padding)
        .instantiate(range)
}
