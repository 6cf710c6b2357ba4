// Copyright 2025 the Plotlet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const MAX_DECIMALS: usize = 12;

/// Formats a tick value using just enough decimals to resolve `step`.
///
/// A step of `0.0` (a single-tick axis) falls back to the shortest round-trip form of `v`.
/// Negative zero is printed as `0`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if !step.is_finite() || step <= 0.0 {
        return normalize_negative_zero(v.to_string());
    }
    let decimals = decimals_for_step(step);
    normalize_negative_zero(format!("{v:.decimals$}"))
}

fn decimals_for_step(step: f64) -> usize {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < MAX_DECIMALS && (scaled - scaled.round()).abs() > 1e-9 * scaled.max(1.0) {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

fn normalize_negative_zero(mut s: String) -> String {
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s.remove(0);
    }
    s
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_have_no_decimals() {
        assert_eq!(format_tick_with_step(20.0, 2.0), "20");
        assert_eq!(format_tick_with_step(1000.0, 100.0), "1000");
    }

    #[test]
    fn fractional_steps_use_minimal_decimals() {
        assert_eq!(format_tick_with_step(4.5, 0.5), "4.5");
        assert_eq!(format_tick_with_step(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick_with_step(0.25, 0.25), "0.25");
        assert_eq!(format_tick_with_step(2.0, 0.2), "2.0");
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
        assert_eq!(format_tick_with_step(-1e-12, 0.1), "0.0");
    }

    #[test]
    fn zero_step_uses_shortest_form() {
        assert_eq!(format_tick_with_step(10.0, 0.0), "10");
        assert_eq!(format_tick_with_step(2.5, 0.0), "2.5");
    }
}
