//! First-order error propagation through an arbitrary function.
//!
//! Given a function `f(x_1, ..., x_n)`, its partial derivatives `df/dx_i`, and `n` operands,
//! the derived quantity has the value `f(x_1, ..., x_n)` and the errors
//!
//! ```text
//! err_sys  =      Σ |df/dx_i * sys_i|
//! err_stat = sqrt(Σ (df/dx_i * stat_i)^2)
//! ```
//!
//! Systematic errors are assumed to push every operand in the same direction, so they add up
//! linearly. Statistical errors are assumed independent, so they add in quadrature.
//!
//! All partial derivatives are evaluated at the operand values. Operands are read through the
//! [`Measured`] trait, so plain numbers can be mixed with quantities as operands without error.
//! Their partial derivatives are still evaluated, so a non-finite derivative makes the result
//! errors NaN.

use crate::{accessor::Measured, error::ShapeMismatch, quantity::Quantity};
use errprop_error::Error;
use tracing::trace;

/// A partial derivative of a function, evaluated at the operand values.
pub type Partial<'a> = &'a dyn Fn(&[f64]) -> f64;

/// Builds the quantity `value(operands)`, propagating the errors of the operands through the
/// given partial derivatives. `partials[i]` must be the partial derivative of `value` with
/// respect to `operands[i]`.
///
/// Returns [`Err`] with [`ShapeMismatch`] if the number of partial derivatives differs from the
/// number of operands.
///
/// ```
/// use errprop_compute::{derived::derive, Quantity};
///
/// // f(x) = ln(x), df/dx = 1 / x
/// let x = Quantity::new(2.0, 0.0, 0.1);
/// let ln = derive(|x| x[0].ln(), &[&|x| 1.0 / x[0]], &[&x]).unwrap();
/// assert_eq!(ln.err_stat(), 0.05);
/// ```
pub fn derive(
    value: impl Fn(&[f64]) -> f64,
    partials: &[Partial<'_>],
    operands: &[&dyn Measured],
) -> Result<Quantity, Error> {
    if partials.len() != operands.len() {
        return Err(Error::new("derive", ShapeMismatch {
            expected: operands.len(),
            found: partials.len(),
        }));
    }

    Ok(propagate(value, partials, operands))
}

/// Same as [`derive`], but assumes there is one partial derivative per operand.
pub(crate) fn propagate(
    value: impl Fn(&[f64]) -> f64,
    partials: &[Partial<'_>],
    operands: &[&dyn Measured],
) -> Quantity {
    let values = operands.iter()
        .map(|operand| operand.value())
        .collect::<Vec<_>>();

    let mut err_sys = 0.0;
    let mut err_stat = 0.0;
    for (partial, operand) in partials.iter().zip(operands) {
        // every operand contributes, so a non-finite derivative yields a non-finite error even
        // when the operand is exact
        let derivative = partial(values.as_slice());
        err_sys += (derivative * operand.sys_error()).abs();
        err_stat += (derivative * operand.stat_error()).powi(2);
    }

    let result = Quantity::new(value(values.as_slice()), err_sys, err_stat.sqrt());
    trace!(operands = operands.len(), ?values, ?result, "propagated errors");
    result
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::error::ShapeMismatch;
    use super::*;

    #[test]
    fn systematic_adds_linearly() {
        let a = Quantity::new(1.0, 0.3, 0.0);
        let b = Quantity::new(1.0, 0.4, 0.0);
        let sum = derive(|x| x[0] + x[1], &[&|_| 1.0, &|_| 1.0], &[&a, &b]).unwrap();
        assert_relative_eq!(sum.err_sys(), 0.7);
        assert_eq!(sum.err_stat(), 0.0);
    }

    #[test]
    fn statistical_adds_in_quadrature() {
        let a = Quantity::new(1.0, 0.0, 0.3);
        let b = Quantity::new(1.0, 0.0, 0.4);
        let sum = derive(|x| x[0] + x[1], &[&|_| 1.0, &|_| 1.0], &[&a, &b]).unwrap();
        assert_relative_eq!(sum.err_stat(), 0.5);
        assert_eq!(sum.err_sys(), 0.0);
    }

    #[test]
    fn negative_derivative_counts_as_positive() {
        let a = Quantity::new(5.0, 0.2, 0.1);
        let neg = derive(|x| -3.0 * x[0], &[&|_| -3.0], &[&a]).unwrap();
        assert_relative_eq!(neg.value(), -15.0);
        assert_relative_eq!(neg.err_sys(), 0.6, max_relative = 1e-12);
        assert_relative_eq!(neg.err_stat(), 0.3, max_relative = 1e-12);
    }

    #[test]
    fn mixes_numbers_and_quantities() {
        let a = Quantity::new(2.0, 0.1, 0.2);
        let product = derive(
            |x| x[0] * x[1],
            &[&|x| x[1], &|x| x[0]],
            &[&a, &4.0],
        ).unwrap();
        assert_relative_eq!(product.value(), 8.0);
        assert_relative_eq!(product.err_sys(), 0.4);
        assert_relative_eq!(product.err_stat(), 0.8);
    }

    #[test]
    fn nested_derivation() {
        // (a * b) + c, built in two steps
        let a = Quantity::new(2.0, 0.1, 0.0);
        let b = Quantity::new(3.0, 0.2, 0.0);
        let c = Quantity::new(1.0, 0.05, 0.0);
        let ab = derive(|x| x[0] * x[1], &[&|x| x[1], &|x| x[0]], &[&a, &b]).unwrap();
        let abc = derive(|x| x[0] + x[1], &[&|_| 1.0, &|_| 1.0], &[&ab, &c]).unwrap();
        assert_relative_eq!(abc.value(), 7.0);
        assert_relative_eq!(abc.err_sys(), 0.75);
    }

    #[test]
    fn singular_derivative_of_exact_operand() {
        // d(a^b)/db = ln(a) * a^b is NaN for a negative base, even though the exponent is exact
        let a = Quantity::new(-2.0, 0.0, 0.1);
        let square = derive(
            |x| x[0].powf(x[1]),
            &[&|x| x[1] * x[0].powf(x[1] - 1.0), &|x| x[0].ln() * x[0].powf(x[1])],
            &[&a, &2.0],
        ).unwrap();
        assert_relative_eq!(square.value(), 4.0);
        assert!(square.err_sys().is_nan());
        assert!(square.err_stat().is_nan());
    }

    #[test]
    fn exact_operands_with_finite_derivatives() {
        let a = Quantity::new(3.0, 0.0, 0.0);
        let b = Quantity::new(4.0, 0.0, 0.0);
        let product = derive(|x| x[0] * x[1], &[&|x| x[1], &|x| x[0]], &[&a, &b]).unwrap();
        assert_eq!(product, Quantity::exact(12.0));
    }

    #[test]
    fn partial_count_mismatch() {
        let a = Quantity::exact(1.0);
        let err = derive(|x| x[0], &[&|_| 1.0, &|_| 1.0], &[&a]).unwrap_err();
        assert_eq!(err.operation, "derive");
        assert_eq!(
            err.downcast_ref::<ShapeMismatch>(),
            Some(&ShapeMismatch { expected: 1, found: 2 }),
        );
    }
}
