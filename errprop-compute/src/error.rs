//! Error kinds produced while building or combining quantities.

use errprop_attrs::ErrorKind;
use errprop_error::ErrorKind;

/// An operand could not be converted to a quantity.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("cannot convert a value of type `{}` to a quantity", self.typename),
    help = "operands must be numbers, quantities, or a flat sequence of either",
)]
pub struct ConversionFailure {
    /// The type of the operand that could not be converted.
    pub typename: &'static str,
}

/// Two sequences that are combined elementwise have different lengths.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected a sequence of {} element(s), found {}", self.expected, self.found),
    help = "elementwise operations require sequences of equal length",
)]
pub struct ShapeMismatch {
    /// The expected number of elements.
    pub expected: usize,

    /// The number of elements that were given.
    pub found: usize,
}

/// The operation needs at least one input.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("cannot compute {} of an empty input", self.what))]
pub struct EmptyInput {
    /// What was being computed.
    pub what: &'static str,
}
