//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Fixed-point units per major currency unit.
pub const MICROS_PER_MAJOR: i64 = 1_000_000;

/// Fixed-point units per cent.
pub const MICROS_PER_CENT: i64 = MICROS_PER_MAJOR / 100;

/// Scale a major-unit amount to millionths, rounding to the nearest unit.
///
/// Non-finite input yields 0 and out-of-range values clamp to the i64 range.
#[must_use]
pub fn major_to_micros(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let scale = cast::<i64, f64>(MICROS_PER_MAJOR).unwrap_or(1_000_000.0);
    let scaled = (value * scale).round();
    if scaled >= max {
        return i64::MAX;
    }
    cast::<f64, i64>(scaled.max(min)).unwrap_or(0)
}

/// Convert millionths back to a major-unit f64 while allowing precision loss in a single location.
#[must_use]
pub fn micros_to_major(micros: i64) -> f64 {
    let scale = cast::<i64, f64>(MICROS_PER_MAJOR).unwrap_or(1_000_000.0);
    cast::<i64, f64>(micros).unwrap_or(0.0) / scale
}

/// Round millionths to whole cents, half away from zero.
#[must_use]
pub fn micros_to_cents(micros: i64) -> i64 {
    let per_cent = MICROS_PER_CENT.unsigned_abs();
    let cents = (micros.unsigned_abs() + per_cent / 2) / per_cent;
    let cents = cast::<u64, i64>(cents).unwrap_or(i64::MAX);
    if micros < 0 { -cents } else { cents }
}
