//! Operands accepted by the arithmetic operations, and their coercion to quantities.

use crate::{error::ConversionFailure, quantity::Quantity};
use errprop_error::Error;
use ndarray::Array1;

/// Any value that can appear on either side of an arithmetic operation.
///
/// Numbers are coerced to quantities without error. Sequences are combined elementwise with
/// the other operand, producing a sequence result. A sequence may mix numbers and quantities,
/// but may not contain other sequences.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A plain number.
    Scalar(f64),

    /// A single quantity.
    Single(Quantity),

    /// A sequence of numbers and / or quantities.
    Sequence(Vec<Operand>),
}

impl Operand {
    /// Returns the typename of this operand.
    pub fn typename(&self) -> &'static str {
        match self {
            Operand::Scalar(_) => "Scalar",
            Operand::Single(_) => "Quantity",
            Operand::Sequence(_) => "Sequence",
        }
    }

    /// Consumes and coerces the operand to either a single quantity or a flat sequence of
    /// quantities.
    ///
    /// Returns [`Err`] with [`ConversionFailure`] if a sequence contains another sequence.
    pub fn coerce(self) -> Result<Quantities, Error> {
        self.coerce_for("coerce")
    }

    /// Same as [`Operand::coerce`], but attributes errors to the given operation.
    pub(crate) fn coerce_for(self, operation: &'static str) -> Result<Quantities, Error> {
        match self {
            Operand::Scalar(n) => Ok(Quantities::Single(Quantity::exact(n))),
            Operand::Single(q) => Ok(Quantities::Single(q)),
            Operand::Sequence(items) => items
                .into_iter()
                .map(|item| match item {
                    Operand::Scalar(n) => Ok(Quantity::exact(n)),
                    Operand::Single(q) => Ok(q),
                    nested => Err(Error::new(operation, ConversionFailure {
                        typename: nested.typename(),
                    })),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Quantities::Sequence),
        }
    }

    /// Returns the value of the operand, or the value of each element if it is a sequence.
    ///
    /// Returns [`Err`] with [`ConversionFailure`] if a sequence contains another sequence.
    pub fn values(&self) -> Result<Values, Error> {
        match self {
            Operand::Scalar(n) => Ok(Values::Scalar(*n)),
            Operand::Single(q) => Ok(Values::Scalar(q.value())),
            Operand::Sequence(items) => items
                .iter()
                .map(|item| match item {
                    Operand::Scalar(n) => Ok(*n),
                    Operand::Single(q) => Ok(q.value()),
                    nested => Err(Error::new("values", ConversionFailure {
                        typename: nested.typename(),
                    })),
                })
                .collect::<Result<Array1<_>, _>>()
                .map(Values::Array),
        }
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Scalar(n)
    }
}

impl From<Quantity> for Operand {
    fn from(q: Quantity) -> Self {
        Operand::Single(q)
    }
}

impl From<&Quantity> for Operand {
    fn from(q: &Quantity) -> Self {
        Operand::Single(*q)
    }
}

impl From<Vec<Quantity>> for Operand {
    fn from(qs: Vec<Quantity>) -> Self {
        Operand::Sequence(qs.into_iter().map(Operand::Single).collect())
    }
}

impl From<&[Quantity]> for Operand {
    fn from(qs: &[Quantity]) -> Self {
        Operand::Sequence(qs.iter().copied().map(Operand::Single).collect())
    }
}

impl From<Vec<f64>> for Operand {
    fn from(ns: Vec<f64>) -> Self {
        Operand::Sequence(ns.into_iter().map(Operand::Scalar).collect())
    }
}

impl From<Vec<Operand>> for Operand {
    fn from(items: Vec<Operand>) -> Self {
        Operand::Sequence(items)
    }
}

impl From<Quantities> for Operand {
    fn from(quantities: Quantities) -> Self {
        match quantities {
            Quantities::Single(q) => q.into(),
            Quantities::Sequence(qs) => qs.into(),
        }
    }
}

/// The result of coercing an [`Operand`], and of every arithmetic operation: either a single
/// quantity, or a sequence of quantities if a sequence was involved.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantities {
    /// A single quantity.
    Single(Quantity),

    /// A sequence of quantities.
    Sequence(Vec<Quantity>),
}

impl Quantities {
    /// Returns the quantity if this is a single quantity.
    pub fn single(self) -> Option<Quantity> {
        match self {
            Quantities::Single(q) => Some(q),
            Quantities::Sequence(_) => None,
        }
    }

    /// Returns the quantities if this is a sequence.
    pub fn sequence(self) -> Option<Vec<Quantity>> {
        match self {
            Quantities::Single(_) => None,
            Quantities::Sequence(qs) => Some(qs),
        }
    }

    /// Returns all quantities as a vector; a single quantity becomes a vector of one.
    pub fn into_vec(self) -> Vec<Quantity> {
        match self {
            Quantities::Single(q) => vec![q],
            Quantities::Sequence(qs) => qs,
        }
    }
}

/// The values of an [`Operand`].
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    /// The value of a number or single quantity.
    Scalar(f64),

    /// The value of each element of a sequence.
    Array(Array1<f64>),
}
