//! Inverse-variance weighted average of independent estimates.

use crate::{
    accessor::{total_errors, values, Measured},
    error::EmptyInput,
    quantity::Quantity,
};
use errprop_error::Error;
use tracing::{debug, warn};

/// Combines independent estimates `x_i` of the same value into a single estimate, weighting
/// each by the inverse of its squared total error:
///
/// ```text
/// w_i = 1 / Δx_i^2
/// x   = Σ(w_i x_i) / Σw_i
/// Δx  = sqrt(1 / Σw_i)
/// ```
///
/// The combined error `Δx` is returned as the statistical error; the result has no systematic
/// error.
///
/// Every input must have a positive total error. An input without error gets an infinite
/// weight, which makes the result non-finite; this is not reported as an error.
///
/// Returns [`Err`] with [`EmptyInput`] if there are no quantities.
pub fn weighted_average<M: Measured>(quantities: &[M]) -> Result<Quantity, Error> {
    if quantities.is_empty() {
        return Err(Error::new("weighted_average", EmptyInput { what: "a weighted average" }));
    }

    let x = values(quantities);
    let delta_x = total_errors(quantities);
    if delta_x.iter().any(|error| *error == 0.0) {
        warn!("weighted average of a quantity without error");
    }

    let w = delta_x.mapv(|error| 1.0 / error.powi(2));
    let w_sum = w.sum();
    let mean = (&x * &w).sum() / w_sum;
    let result = Quantity::new(mean, 0.0, (1.0 / w_sum).sqrt());

    debug!(n = quantities.len(), ?result, "weighted average");
    Ok(result)
}
