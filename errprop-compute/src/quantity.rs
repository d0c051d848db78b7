use crate::fmt::{FormatOptions, QuantityFormatter};
use std::fmt::{Display, Formatter};

/// A measured or derived physical value, carrying a systematic and a statistical error.
///
/// Both errors are non-negative. An error of exactly `0.0` is treated as "this error component
/// does not apply"; there is no way to distinguish it from an error that is known to be zero,
/// and [`Quantity::errors`] and the formatter both skip such components.
///
/// Quantities are immutable. Every arithmetic operation (see the [`ops`](crate::ops) module)
/// returns a new quantity whose errors are propagated from the operands.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Quantity {
    value: f64,
    err_sys: f64,
    err_stat: f64,
}

impl Quantity {
    /// Creates a new quantity with the given value, systematic error, and statistical error.
    ///
    /// The errors must be non-negative.
    pub fn new(value: f64, err_sys: f64, err_stat: f64) -> Self {
        debug_assert!(!(err_sys < 0.0), "systematic error must be non-negative, got {}", err_sys);
        debug_assert!(!(err_stat < 0.0), "statistical error must be non-negative, got {}", err_stat);
        Self { value, err_sys, err_stat }
    }

    /// Creates a quantity with no error. This is how plain numbers take part in propagation.
    pub const fn exact(value: f64) -> Self {
        Self { value, err_sys: 0.0, err_stat: 0.0 }
    }

    /// Creates a quantity from the array `[value, err_sys, err_stat]`, the inverse of
    /// [`Quantity::to_arr`].
    pub fn from_arr([value, err_sys, err_stat]: [f64; 3]) -> Self {
        Self::new(value, err_sys, err_stat)
    }

    /// The central estimate.
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The systematic error.
    pub const fn err_sys(&self) -> f64 {
        self.err_sys
    }

    /// The statistical error.
    pub const fn err_stat(&self) -> f64 {
        self.err_stat
    }

    /// The errors that apply to this quantity, i.e. the error components greater than zero, in
    /// the order `[err_sys, err_stat]`.
    pub fn errors(&self) -> Vec<f64> {
        [self.err_sys, self.err_stat]
            .into_iter()
            .filter(|error| *error > 0.0)
            .collect()
    }

    /// The errors of [`Quantity::errors`] relative to the value, in percent.
    pub fn relative_errors(&self) -> Vec<f64> {
        self.errors()
            .into_iter()
            .map(|error| 100.0 * error / self.value)
            .collect()
    }

    /// The first relative error in percent, if any error applies.
    pub fn relative_error(&self) -> Option<f64> {
        self.relative_errors().first().copied()
    }

    /// Multiplies the value and both errors by `factor`.
    ///
    /// This is an exact linear transform and does not go through the propagation engine. The
    /// errors are scaled by `|factor|`, so the result equals multiplying by
    /// [`Quantity::exact(factor)`](Quantity::exact).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            value: self.value * factor,
            err_sys: self.err_sys * factor.abs(),
            err_stat: self.err_stat * factor.abs(),
        }
    }

    /// Returns `[value, err_sys, err_stat]`.
    pub const fn to_arr(&self) -> [f64; 3] {
        [self.value, self.err_sys, self.err_stat]
    }

    /// Returns a formatter for the quantity with the given options.
    pub fn fmt(&self, options: FormatOptions) -> QuantityFormatter<'_> {
        QuantityFormatter {
            quantity: self,
            options,
        }
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self::exact(value)
    }
}

impl From<[f64; 3]> for Quantity {
    fn from(arr: [f64; 3]) -> Self {
        Self::from_arr(arr)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt(Default::default()).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn errors_skip_zero_components() {
        assert_eq!(Quantity::new(1.0, 0.1, 0.2).errors(), vec![0.1, 0.2]);
        assert_eq!(Quantity::new(1.0, 0.0, 0.2).errors(), vec![0.2]);
        assert_eq!(Quantity::new(1.0, 0.1, 0.0).errors(), vec![0.1]);
        assert!(Quantity::exact(1.0).errors().is_empty());
    }

    #[test]
    fn relative_errors_in_percent() {
        let q = Quantity::new(4.0, 0.2, 0.4);
        let rel = q.relative_errors();
        assert_eq!(rel.len(), 2);
        assert_relative_eq!(rel[0], 5.0);
        assert_relative_eq!(rel[1], 10.0);
        assert_relative_eq!(q.relative_error().unwrap(), 5.0);
    }

    #[test]
    fn relative_error_of_exact() {
        assert_eq!(Quantity::exact(3.0).relative_error(), None);
    }

    #[test]
    fn scale_is_linear() {
        let q = Quantity::new(2.0, 0.1, 0.3).scale(3.0);
        assert_relative_eq!(q.value(), 6.0);
        assert_relative_eq!(q.err_sys(), 0.3, max_relative = 1e-12);
        assert_relative_eq!(q.err_stat(), 0.9, max_relative = 1e-12);
    }

    #[test]
    fn scale_negative_keeps_errors_positive() {
        let q = Quantity::new(2.0, 0.1, 0.3).scale(-2.0);
        assert_eq!(q.to_arr(), [-4.0, 0.2, 0.6]);
    }

    #[test]
    fn round_trip_through_array() {
        let q = Quantity::new(-1.25, 0.125, 3.5e-7);
        assert_eq!(Quantity::from_arr(q.to_arr()), q);
        assert_eq!(Quantity::from(q.to_arr()), q);
    }

    #[test]
    fn plain_number_is_exact() {
        assert_eq!(Quantity::from(7.5), Quantity::new(7.5, 0.0, 0.0));
    }
}
