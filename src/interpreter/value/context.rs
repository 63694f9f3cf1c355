use std::cmp::Ordering;

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::util::num::{adjusted_exponent, digit_count};

/// Default number of significant digits kept by every arithmetic step.
pub const DEFAULT_PRECISION: u64 = 30;
/// Default number of decimal places shown for an inexact result.
pub const DEFAULT_DISPLAY_PLACES: i64 = 10;
/// Results whose magnitude is at most `10^-ZERO_EPSILON_EXPONENT` snap to zero.
pub const ZERO_EPSILON_EXPONENT: i64 = 29;
/// Largest decimal exponent of a representable value. Results of magnitude
/// `10^(MAX_EXPONENT + 1)` or more are out of range; results below
/// `10^-MAX_EXPONENT` underflow to zero.
pub const MAX_EXPONENT: i64 = 10_000;

/// Numeric configuration for one evaluation.
///
/// The context is passed explicitly into the evaluator, so two calculations
/// with different precision or rounding never observe each other's settings.
///
/// ## Example
/// ```
/// use dailycalc::interpreter::value::context::DecimalContext;
///
/// let context = DecimalContext::default();
/// assert_eq!(context.precision, 30);
/// assert_eq!(context.display_places, 10);
/// assert!(context.snap_to_zero);
/// ```
#[derive(Debug, Clone)]
pub struct DecimalContext {
    /// Significant digits kept after each reduction.
    pub precision:      u64,
    /// Rounding mode used for precision loss, `round()` and final display.
    pub rounding:       RoundingMode,
    /// Decimal places of an inexact final result.
    pub display_places: i64,
    /// Replace near-zero results by an exact zero after each reduction.
    pub snap_to_zero:   bool,
    epsilon:            BigDecimal,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self { precision:      DEFAULT_PRECISION,
               rounding:       RoundingMode::HalfUp,
               display_places: DEFAULT_DISPLAY_PLACES,
               snap_to_zero:   true,
               epsilon:        BigDecimal::new(BigInt::from(1), ZERO_EPSILON_EXPONENT), }
    }
}

impl DecimalContext {
    /// A copy of this context working with `precision` significant digits.
    #[must_use]
    pub fn with_precision(&self, precision: u64) -> Self {
        Self { precision,
               ..self.clone() }
    }

    /// Rounds `value` to the working precision.
    ///
    /// Returns the rounded value and whether digits were lost.
    #[must_use]
    pub fn round(&self, value: BigDecimal) -> (BigDecimal, bool) {
        let (mantissa, scale) = value.as_bigint_and_exponent();
        let digits = digit_count(&mantissa);

        if self.precision == 0 || digits <= self.precision {
            return (value, false);
        }

        let excess = i64::try_from(digits - self.precision).unwrap_or(i64::MAX);
        let rounded = value.with_scale_round(scale.saturating_sub(excess), self.rounding);
        let inexact = rounded != value;

        (rounded, inexact)
    }

    /// Replaces a value within the zero epsilon by canonical zero.
    #[must_use]
    pub fn snap(&self, value: BigDecimal) -> BigDecimal {
        if !self.snap_to_zero {
            return value;
        }

        let tiny = match adjusted_exponent(&value).cmp(&-ZERO_EPSILON_EXPONENT) {
            Ordering::Less => true,
            Ordering::Equal => value.abs() <= self.epsilon,
            Ordering::Greater => false,
        };
        if tiny { BigDecimal::zero() } else { value }
    }

    /// Checks `value` against the representable range.
    ///
    /// ## Returns
    /// - `Some(BigDecimal)`: The value, or zero if it underflows.
    /// - `None`: If the value is too large.
    #[must_use]
    pub fn confine(&self, value: BigDecimal) -> Option<BigDecimal> {
        let exponent = adjusted_exponent(&value);
        if exponent > MAX_EXPONENT {
            None
        } else if exponent < -MAX_EXPONENT {
            Some(BigDecimal::zero())
        } else {
            Some(value)
        }
    }

    /// Applies precision rounding, the range check and zero snapping, the
    /// post-reduction step.
    ///
    /// Returns the settled value and whether digits were lost, or `None` if
    /// the value is out of range.
    #[must_use]
    pub fn settle(&self, value: BigDecimal) -> Option<(BigDecimal, bool)> {
        let (value, inexact) = self.round(value);
        let value = self.confine(value)?;
        Some((self.snap(value), inexact))
    }

    /// Rounds to a fixed number of decimal places with the context rounding.
    ///
    /// Padding is limited to `MAX_EXPONENT` places, and rounding positions far
    /// above the leading digit are handled without building the full integer.
    ///
    /// ## Example
    /// ```
    /// use std::str::FromStr;
    ///
    /// use bigdecimal::BigDecimal;
    /// use dailycalc::interpreter::value::context::DecimalContext;
    ///
    /// let context = DecimalContext::default();
    /// let value = BigDecimal::from_str("123.456").unwrap();
    /// assert_eq!(context.quantize(&value, 1).to_string(), "123.5");
    /// assert_eq!(context.quantize(&value, -1), BigDecimal::from(120));
    /// assert_eq!(context.quantize(&value, -1_000_000_000), BigDecimal::from(0));
    /// assert_eq!(context.quantize(&value, 1_000_000_000), value);
    /// ```
    #[must_use]
    pub fn quantize(&self, value: &BigDecimal, places: i64) -> BigDecimal {
        let (_, scale) = value.as_bigint_and_exponent();
        if places >= scale {
            return value.with_scale(places.min(scale.max(MAX_EXPONENT)));
        }

        // every digit lies below the rounding position
        let lowest = adjusted_exponent(value).saturating_add(2).saturating_neg();
        if places < lowest {
            if value.with_scale_round(lowest, self.rounding).is_zero() {
                return BigDecimal::zero();
            }
            let unit = if value.is_negative() { -BigInt::one() } else { BigInt::one() };
            return BigDecimal::new(unit, places);
        }

        value.with_scale_round(places, self.rounding)
    }

    /// Produces the value shown to the user.
    ///
    /// Inexact results are shown with exactly `display_places` decimals;
    /// exact results lose their trailing zeros and never use exponent form.
    ///
    /// ## Example
    /// ```
    /// use std::str::FromStr;
    ///
    /// use bigdecimal::BigDecimal;
    /// use dailycalc::interpreter::value::context::DecimalContext;
    ///
    /// let context = DecimalContext::default();
    /// let value = BigDecimal::from_str("1.2500").unwrap();
    /// assert_eq!(context.finalize(&value, false).to_string(), "1.25");
    /// ```
    #[must_use]
    pub fn finalize(&self, value: &BigDecimal, inexact: bool) -> BigDecimal {
        if inexact {
            return self.quantize(value, self.display_places);
        }

        let normalized = value.normalized();
        let (_, scale) = normalized.as_bigint_and_exponent();
        if scale < 0 {
            normalized.with_scale(0)
        } else {
            normalized
        }
    }
}
