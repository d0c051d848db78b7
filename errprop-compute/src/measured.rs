//! Quantities built from repeated measurements.

use crate::{accessor::Measured, error::EmptyInput, operand::Operand, quantity::Quantity};
use errprop_error::Error;
use ndarray::Array1;
use std::{fmt::{Display, Formatter}, ops};
use tracing::debug;

/// The default multiplier applied to the standard error of the mean. A sigma interval of `2`
/// corresponds to a confidence of about 95.4% for normally distributed measurements (`1` is
/// about 68.3%, `3` about 99.7%).
pub const DEFAULT_SIGMA_INTERVAL: f64 = 2.0;

/// A quantity derived from a series of raw measurements of the same value.
///
/// The value is the mean of the measurements. If more than one measurement was taken, the
/// statistical error is the standard error of the mean, widened by the sigma interval:
///
/// ```text
/// err_stat = sigma_interval * std(measurements) / sqrt(N)
/// ```
///
/// where `std` is the population standard deviation (dividing by `N`). A single measurement
/// has no statistical error. The systematic error is given directly.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredQuantity {
    measurements: Array1<f64>,
    sigma_interval: f64,
    quantity: Quantity,
}

impl MeasuredQuantity {
    /// Builds a measured quantity with no systematic error and the
    /// [default sigma interval](DEFAULT_SIGMA_INTERVAL).
    ///
    /// Returns [`Err`] with [`EmptyInput`] if there are no measurements.
    pub fn new(measurements: impl IntoIterator<Item = f64>) -> Result<Self, Error> {
        Self::builder(measurements).build()
    }

    /// Returns a builder to customize the systematic error and sigma interval.
    pub fn builder(measurements: impl IntoIterator<Item = f64>) -> MeasuredQuantityBuilder {
        MeasuredQuantityBuilder {
            measurements: measurements.into_iter().collect(),
            err_sys: 0.0,
            sigma_interval: DEFAULT_SIGMA_INTERVAL,
        }
    }

    /// The raw measurements.
    pub fn measurements(&self) -> &Array1<f64> {
        &self.measurements
    }

    /// The sigma interval used for the statistical error.
    pub fn sigma_interval(&self) -> f64 {
        self.sigma_interval
    }

    /// The resulting quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Helper struct to build a [`MeasuredQuantity`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredQuantityBuilder {
    measurements: Array1<f64>,
    err_sys: f64,
    sigma_interval: f64,
}

impl MeasuredQuantityBuilder {
    /// Sets the systematic error.
    pub fn err_sys(mut self, err_sys: f64) -> Self {
        self.err_sys = err_sys;
        self
    }

    /// Sets the multiplier applied to the standard error of the mean.
    pub fn sigma_interval(mut self, sigma_interval: f64) -> Self {
        self.sigma_interval = sigma_interval;
        self
    }

    /// Builds the [`MeasuredQuantity`].
    ///
    /// Returns [`Err`] with [`EmptyInput`] if there are no measurements.
    pub fn build(self) -> Result<MeasuredQuantity, Error> {
        let Self { measurements, err_sys, sigma_interval } = self;
        let mean = measurements.mean()
            .ok_or_else(|| Error::new("measure", EmptyInput { what: "the mean" }))?;

        let n = measurements.len();
        let err_stat = if n > 1 {
            sigma_interval * measurements.std(0.0) / (n as f64).sqrt()
        } else {
            0.0
        };

        let quantity = Quantity::new(mean, err_sys, err_stat);
        debug!(n, sigma_interval, ?quantity, "measured quantity");
        Ok(MeasuredQuantity { measurements, sigma_interval, quantity })
    }
}

impl Measured for MeasuredQuantity {
    fn value(&self) -> f64 {
        self.quantity.value()
    }

    fn sys_error(&self) -> f64 {
        self.quantity.err_sys()
    }

    fn stat_error(&self) -> f64 {
        self.quantity.err_stat()
    }

    fn to_quantity(&self) -> Quantity {
        self.quantity
    }
}

impl From<MeasuredQuantity> for Quantity {
    fn from(measured: MeasuredQuantity) -> Self {
        measured.quantity
    }
}

impl From<&MeasuredQuantity> for Quantity {
    fn from(measured: &MeasuredQuantity) -> Self {
        measured.quantity
    }
}

impl From<MeasuredQuantity> for Operand {
    fn from(measured: MeasuredQuantity) -> Self {
        Operand::Single(measured.quantity)
    }
}

impl From<&MeasuredQuantity> for Operand {
    fn from(measured: &MeasuredQuantity) -> Self {
        Operand::Single(measured.quantity)
    }
}

/// Implements a binary operator between a borrowed [`MeasuredQuantity`] and anything that
/// converts to a [`Quantity`], on either side.
macro_rules! measured_op_impl {
    ($($trait:ident $method:ident),* $(,)?) => {
        $(
            impl<T: Into<Quantity>> ops::$trait<T> for &MeasuredQuantity {
                type Output = Quantity;

                fn $method(self, rhs: T) -> Quantity {
                    ops::$trait::$method(self.quantity, Into::<Quantity>::into(rhs))
                }
            }

            impl ops::$trait<&MeasuredQuantity> for Quantity {
                type Output = Quantity;

                fn $method(self, rhs: &MeasuredQuantity) -> Quantity {
                    ops::$trait::$method(self, rhs.quantity)
                }
            }

            impl ops::$trait<&MeasuredQuantity> for f64 {
                type Output = Quantity;

                fn $method(self, rhs: &MeasuredQuantity) -> Quantity {
                    ops::$trait::$method(self, rhs.quantity)
                }
            }
        )*
    };
}

measured_op_impl! {
    Add add,
    Sub sub,
    Mul mul,
    Div div,
}

impl Display for MeasuredQuantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.quantity, f)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use crate::error::EmptyInput;
    use super::*;

    #[test]
    fn mean_and_standard_error() {
        let m = MeasuredQuantity::new([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_float_relative_eq!(m.value(), 2.5);

        // population std is sqrt(1.25); 2 * sqrt(1.25) / sqrt(4)
        assert_float_relative_eq!(m.stat_error(), 1.25f64.sqrt());
        assert_eq!(m.sys_error(), 0.0);
        assert_eq!(m.sigma_interval(), DEFAULT_SIGMA_INTERVAL);
        assert_eq!(m.measurements().len(), 4);
    }

    #[test]
    fn identical_measurements_have_no_statistical_error() {
        let m = MeasuredQuantity::new([1.0, 1.0, 1.0]).unwrap();
        assert_eq!(m.quantity(), Quantity::exact(1.0));
    }

    #[test]
    fn single_measurement_ignores_sigma_interval() {
        let m = MeasuredQuantity::builder([4.2])
            .sigma_interval(3.0)
            .build()
            .unwrap();
        assert_eq!(m.value(), 4.2);
        assert_eq!(m.stat_error(), 0.0);
    }

    #[test]
    fn systematic_error_passes_through() {
        let m = MeasuredQuantity::builder(vec![9.8, 9.9])
            .err_sys(0.05)
            .build()
            .unwrap();
        assert_eq!(m.sys_error(), 0.05);
        assert_relative_eq!(m.value(), 9.85);
    }

    #[test]
    fn sigma_interval_scales_statistical_error() {
        let samples = [10.0, 12.0, 11.0, 13.0];
        let one = MeasuredQuantity::builder(samples).sigma_interval(1.0).build().unwrap();
        let three = MeasuredQuantity::builder(samples).sigma_interval(3.0).build().unwrap();
        assert_relative_eq!(three.stat_error(), 3.0 * one.stat_error());
    }

    #[test]
    fn empty_measurements() {
        let err = MeasuredQuantity::new(Vec::new()).unwrap_err();
        assert_eq!(err.operation, "measure");
        assert!(err.is::<EmptyInput>());
    }

    #[test]
    fn takes_part_in_arithmetic() {
        let m = MeasuredQuantity::builder([2.0]).err_sys(0.1).build().unwrap();
        let doubled = Quantity::from(&m) * 2.0;
        assert_eq!(doubled.value(), 4.0);
        assert_relative_eq!(doubled.err_sys(), 0.2);
        assert_eq!(m.to_string(), "2 ± 0.1");
    }

    #[test]
    fn operators_on_borrowed_measurement() {
        let m = MeasuredQuantity::builder([3.0]).err_sys(0.3).build().unwrap();
        let q = Quantity::new(2.0, 0.1, 0.0);

        let product = &m * q;
        assert_relative_eq!(product.value(), 6.0);
        assert_relative_eq!(product.err_sys(), 0.9);
        assert_eq!(product, q * &m);

        assert_eq!(&m + 1.0, Quantity::new(4.0, 0.3, 0.0));
        assert_eq!(6.0 / &m, 6.0 / m.quantity());
        assert_eq!(&m - &m, m.quantity() - m.quantity());
    }

    #[test]
    fn borrowed_measurement_as_operand() {
        let m = MeasuredQuantity::builder([1.5]).err_sys(0.1).build().unwrap();
        let sums = crate::ops::add(&m, vec![1.0, 2.0]).unwrap().into_vec();
        assert_eq!(sums.len(), 2);
        assert_relative_eq!(sums[1].value(), 3.5);
        assert_relative_eq!(sums[1].err_sys(), 0.1);
        assert_eq!(Operand::from(&m), Operand::Single(m.quantity()));
    }
}
