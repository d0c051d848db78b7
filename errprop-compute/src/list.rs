//! Construction of many independent quantities at once.

use crate::{error::ShapeMismatch, quantity::Quantity};
use errprop_error::Error;

/// The errors to assign to a list of values: either the same error for every value, or one
/// error per value.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSpec {
    /// Every value gets this error.
    Uniform(f64),

    /// The `i`-th value gets the `i`-th error.
    PerElement(Vec<f64>),
}

impl ErrorSpec {
    /// Returns the error for the element at `index`.
    fn get(&self, index: usize) -> f64 {
        match self {
            ErrorSpec::Uniform(error) => *error,
            ErrorSpec::PerElement(errors) => errors[index],
        }
    }

    /// Checks that these errors can be applied to `len` values.
    fn check_len(&self, len: usize) -> Result<(), Error> {
        match self {
            ErrorSpec::PerElement(errors) if errors.len() != len => {
                Err(Error::new("quantities", ShapeMismatch {
                    expected: len,
                    found: errors.len(),
                }))
            },
            _ => Ok(()),
        }
    }
}

impl Default for ErrorSpec {
    fn default() -> Self {
        ErrorSpec::Uniform(0.0)
    }
}

impl From<f64> for ErrorSpec {
    fn from(error: f64) -> Self {
        ErrorSpec::Uniform(error)
    }
}

impl From<Vec<f64>> for ErrorSpec {
    fn from(errors: Vec<f64>) -> Self {
        ErrorSpec::PerElement(errors)
    }
}

impl From<&[f64]> for ErrorSpec {
    fn from(errors: &[f64]) -> Self {
        ErrorSpec::PerElement(errors.to_vec())
    }
}

/// Creates one independent quantity per value, with systematic and statistical errors taken
/// from the given specs.
///
/// Returns [`Err`] with [`ShapeMismatch`] if a per-element [`ErrorSpec`] has a different length
/// than `values`.
///
/// ```
/// use errprop_compute::list::quantities;
///
/// let qs = quantities(&[1.0, 2.0], 0.1, vec![0.3, 0.4]).unwrap();
/// assert_eq!(qs[1].to_arr(), [2.0, 0.1, 0.4]);
/// ```
pub fn quantities(
    values: &[f64],
    err_sys: impl Into<ErrorSpec>,
    err_stat: impl Into<ErrorSpec>,
) -> Result<Vec<Quantity>, Error> {
    let (err_sys, err_stat) = (err_sys.into(), err_stat.into());
    err_sys.check_len(values.len())?;
    err_stat.check_len(values.len())?;

    Ok(values.iter()
        .enumerate()
        .map(|(i, value)| Quantity::new(*value, err_sys.get(i), err_stat.get(i)))
        .collect())
}
