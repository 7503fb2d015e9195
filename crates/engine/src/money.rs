//! Amount semantics shared by every record and report.
//!
//! Business amounts are `f64` values that may be absent on a record.
//! This module is the single place where the two conventions around them
//! live:
//!
//! - [`or_zero`]: an absent amount counts as zero during aggregation. Every
//!   record type exposes a `*_or_zero()` accessor that goes through here
//!   instead of open-coding `unwrap_or(0.0)` at each call site.
//! - [`format_fixed2`]: percentages and profit shares are *rendered* with
//!   exactly two decimals. Rounding happens only at this formatting step;
//!   internal arithmetic stays plain `f64`.

/// Applies the absent-means-zero rule to an optional amount.
#[must_use]
pub(crate) fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Renders a value with exactly two decimal digits.
///
/// Rounds half away from zero at the second decimal, so `0.125` becomes
/// `"0.13"` and `-0.125` becomes `"-0.13"`. A result that rounds to zero is
/// normalized to `"0.00"` (never `"-0.00"`).
#[must_use]
pub(crate) fn format_fixed2(value: f64) -> String {
    let mut rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        rounded = 0.0;
    }
    format!("{rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_amounts_count_as_zero() {
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(12.5)), 12.5);
    }

    #[test]
    fn formats_two_decimals() {
        assert_eq!(format_fixed2(0.0), "0.00");
        assert_eq!(format_fixed2(33.333_333), "33.33");
        assert_eq!(format_fixed2(66.666_666), "66.67");
        assert_eq!(format_fixed2(-1050.5), "-1050.50");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_fixed2(0.125), "0.13");
        assert_eq!(format_fixed2(-0.125), "-0.13");
    }

    #[test]
    fn never_renders_negative_zero() {
        assert_eq!(format_fixed2(-0.0001), "0.00");
    }
}
