//! Arithmetic on quantities.
//!
//! Every operation is expressed through the [propagation engine](crate::derived) with the
//! following partial derivatives:
//!
//! | Operation  | `c(a, b)`    | `dc/da`        | `dc/db`          |
//! | ---------- | ------------ | -------------- | ---------------- |
//! | `add`      | `a + b`      | `1`            | `1`              |
//! | `subtract` | `a + (-1 b)` | via `add`      | via `multiply`   |
//! | `multiply` | `a b`        | `b`            | `a`              |
//! | `divide`   | `a / b`      | `1 / b`        | `-a / b^2`       |
//! | `power`    | `a^b`        | `b a^(b - 1)`  | `ln(a) a^b`      |
//! | `sqrt`     | `a^0.5`      | via `power`    |                  |
//! | `exp`      | `e^a`        | `e^a`          |                  |
//!
//! Quantities support the standard operators with other quantities and with plain numbers on
//! either side, which never fail. The named functions in this module additionally accept
//! sequences through [`Operand`]: a single quantity combined with a sequence yields the
//! sequence of elementwise results, and two sequences are combined elementwise.

use crate::{
    derived::propagate,
    error::ShapeMismatch,
    operand::{Operand, Quantities},
    quantity::Quantity,
};
use errprop_error::Error;
use std::ops;

fn add_quantities(a: &Quantity, b: &Quantity) -> Quantity {
    propagate(|x| x[0] + x[1], &[&|_| 1.0, &|_| 1.0], &[a, b])
}

fn subtract_quantities(a: &Quantity, b: &Quantity) -> Quantity {
    add_quantities(a, &multiply_quantities(b, &Quantity::exact(-1.0)))
}

fn multiply_quantities(a: &Quantity, b: &Quantity) -> Quantity {
    propagate(|x| x[0] * x[1], &[&|x| x[1], &|x| x[0]], &[a, b])
}

fn divide_quantities(a: &Quantity, b: &Quantity) -> Quantity {
    propagate(
        |x| x[0] / x[1],
        &[&|x| 1.0 / x[1], &|x| -x[0] / x[1].powi(2)],
        &[a, b],
    )
}

fn power_quantities(a: &Quantity, b: &Quantity) -> Quantity {
    propagate(
        |x| x[0].powf(x[1]),
        &[
            &|x| x[1] * x[0].powf(x[1] - 1.0),
            &|x| x[0].ln() * x[0].powf(x[1]),
        ],
        &[a, b],
    )
}

fn exp_quantity(a: &Quantity) -> Quantity {
    propagate(|x| x[0].exp(), &[&|x| x[0].exp()], &[a])
}

/// Combines two operands with `f`, broadcasting single quantities over sequences.
fn broadcast(
    operation: &'static str,
    lhs: Operand,
    rhs: Operand,
    f: impl Fn(&Quantity, &Quantity) -> Quantity,
) -> Result<Quantities, Error> {
    let lhs = lhs.coerce_for(operation)?;
    let rhs = rhs.coerce_for(operation)?;
    match (lhs, rhs) {
        (Quantities::Single(a), Quantities::Single(b)) => Ok(Quantities::Single(f(&a, &b))),
        (Quantities::Single(a), Quantities::Sequence(ys)) => {
            Ok(Quantities::Sequence(ys.iter().map(|b| f(&a, b)).collect()))
        },
        (Quantities::Sequence(xs), Quantities::Single(b)) => {
            Ok(Quantities::Sequence(xs.iter().map(|a| f(a, &b)).collect()))
        },
        (Quantities::Sequence(xs), Quantities::Sequence(ys)) => {
            if xs.len() != ys.len() {
                return Err(Error::new(operation, ShapeMismatch {
                    expected: xs.len(),
                    found: ys.len(),
                }));
            }

            Ok(Quantities::Sequence(
                xs.iter().zip(&ys).map(|(a, b)| f(a, b)).collect()
            ))
        },
    }
}

/// Applies `f` to the operand, or to each element if it is a sequence.
fn map(
    operation: &'static str,
    operand: Operand,
    f: impl Fn(&Quantity) -> Quantity,
) -> Result<Quantities, Error> {
    Ok(match operand.coerce_for(operation)? {
        Quantities::Single(a) => Quantities::Single(f(&a)),
        Quantities::Sequence(xs) => Quantities::Sequence(xs.iter().map(f).collect()),
    })
}

/// Computes `lhs + rhs`.
///
/// Returns [`Err`] if an operand cannot be converted to a quantity, or if both operands are
/// sequences of different lengths.
pub fn add(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Quantities, Error> {
    broadcast("add", lhs.into(), rhs.into(), add_quantities)
}

/// Computes `lhs - rhs` as `lhs + (-1 * rhs)`.
///
/// Returns [`Err`] if an operand cannot be converted to a quantity, or if both operands are
/// sequences of different lengths.
pub fn subtract(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Quantities, Error> {
    broadcast("subtract", lhs.into(), rhs.into(), subtract_quantities)
}

/// Computes `lhs * rhs`.
///
/// Returns [`Err`] if an operand cannot be converted to a quantity, or if both operands are
/// sequences of different lengths.
pub fn multiply(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Quantities, Error> {
    broadcast("multiply", lhs.into(), rhs.into(), multiply_quantities)
}

/// Computes `lhs / rhs`. Dividing by an exact zero yields a non-finite value; it is not
/// reported as an error.
///
/// Returns [`Err`] if an operand cannot be converted to a quantity, or if both operands are
/// sequences of different lengths.
pub fn divide(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Quantities, Error> {
    broadcast("divide", lhs.into(), rhs.into(), divide_quantities)
}

/// Computes `base ^ exponent`.
///
/// Returns [`Err`] if an operand cannot be converted to a quantity, or if both operands are
/// sequences of different lengths.
pub fn power(base: impl Into<Operand>, exponent: impl Into<Operand>) -> Result<Quantities, Error> {
    broadcast("power", base.into(), exponent.into(), power_quantities)
}

/// Computes the square root of the operand as `operand ^ 0.5`.
///
/// Returns [`Err`] if the operand cannot be converted to a quantity.
pub fn sqrt(operand: impl Into<Operand>) -> Result<Quantities, Error> {
    map("sqrt", operand.into(), |a| power_quantities(a, &Quantity::exact(0.5)))
}

/// Computes `e ^ operand`.
///
/// Returns [`Err`] if the operand cannot be converted to a quantity.
pub fn exp(operand: impl Into<Operand>) -> Result<Quantities, Error> {
    map("exp", operand.into(), exp_quantity)
}

impl Quantity {
    /// Raises this quantity to the power of `exponent`.
    pub fn pow(&self, exponent: impl Into<Quantity>) -> Quantity {
        power_quantities(self, &exponent.into())
    }

    /// Raises `base` to the power of this quantity.
    pub fn rpow(&self, base: impl Into<Quantity>) -> Quantity {
        power_quantities(&base.into(), self)
    }

    /// Computes `lhs - self`.
    pub fn rsub(&self, lhs: impl Into<Quantity>) -> Quantity {
        subtract_quantities(&lhs.into(), self)
    }

    /// Computes `lhs / self`.
    pub fn rdiv(&self, lhs: impl Into<Quantity>) -> Quantity {
        divide_quantities(&lhs.into(), self)
    }

    /// Returns the square root of this quantity.
    pub fn sqrt(&self) -> Quantity {
        self.pow(0.5)
    }

    /// Returns `e` raised to the power of this quantity.
    pub fn exp(&self) -> Quantity {
        exp_quantity(self)
    }
}

/// Implements a binary operator for every combination of [`Quantity`] and [`f64`].
macro_rules! binary_op_impl {
    ($($trait:ident $method:ident => $f:ident),* $(,)?) => {
        $(
            impl ops::$trait for Quantity {
                type Output = Quantity;

                fn $method(self, rhs: Quantity) -> Quantity {
                    $f(&self, &rhs)
                }
            }

            impl ops::$trait<f64> for Quantity {
                type Output = Quantity;

                fn $method(self, rhs: f64) -> Quantity {
                    $f(&self, &Quantity::exact(rhs))
                }
            }

            impl ops::$trait<Quantity> for f64 {
                type Output = Quantity;

                fn $method(self, rhs: Quantity) -> Quantity {
                    $f(&Quantity::exact(self), &rhs)
                }
            }
        )*
    };
}

binary_op_impl! {
    Add add => add_quantities,
    Sub sub => subtract_quantities,
    Mul mul => multiply_quantities,
    Div div => divide_quantities,
}

impl ops::Neg for Quantity {
    type Output = Quantity;

    fn neg(self) -> Quantity {
        self.scale(-1.0)
    }
}

impl ops::Mul<&[Quantity]> for Quantity {
    type Output = Vec<Quantity>;

    fn mul(self, rhs: &[Quantity]) -> Vec<Quantity> {
        rhs.iter().map(|b| multiply_quantities(&self, b)).collect()
    }
}

impl ops::Mul<Vec<Quantity>> for Quantity {
    type Output = Vec<Quantity>;

    fn mul(self, rhs: Vec<Quantity>) -> Vec<Quantity> {
        self * rhs.as_slice()
    }
}

impl ops::Mul<Quantity> for Vec<Quantity> {
    type Output = Vec<Quantity>;

    fn mul(self, rhs: Quantity) -> Vec<Quantity> {
        self.iter().map(|a| multiply_quantities(a, &rhs)).collect()
    }
}
