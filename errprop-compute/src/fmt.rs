//! Formatting of quantities as `value ± err_sys ± err_stat`.

use crate::quantity::Quantity;
use std::fmt::{Display, Formatter};

/// The default number of decimals used when formatting absolute errors.
pub const DEFAULT_DECIMALS: usize = 3;

/// The default number of decimals used when formatting relative errors.
pub const DEFAULT_RELATIVE_DECIMALS: usize = 2;

/// Formatting options for quantities.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// How to display the errors of the quantity.
    pub errors: ErrorMode,

    /// The number of decimals to round the value and the errors to. If [`None`], the default of
    /// the error mode is used: [`DEFAULT_DECIMALS`] for [`ErrorMode::Absolute`] and
    /// [`DEFAULT_RELATIVE_DECIMALS`] for [`ErrorMode::Relative`].
    ///
    /// Errors that round to zero are not displayed.
    pub decimals: Option<usize>,
}

impl FormatOptions {
    /// Wraps the given [`FormatOptions`] into a builder for further customization.
    pub fn into_builder(self) -> FormatOptionsBuilder {
        FormatOptionsBuilder(self)
    }

    /// The number of decimals that will actually be used.
    pub fn effective_decimals(&self) -> usize {
        self.decimals.unwrap_or(match self.errors {
            ErrorMode::Absolute => DEFAULT_DECIMALS,
            ErrorMode::Relative => DEFAULT_RELATIVE_DECIMALS,
        })
    }
}

/// The different ways to display the errors of a quantity.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Displays the errors in the unit of the value, e.g. `2 ± 0.1`.
    ///
    /// This is the default option.
    #[default]
    Absolute,

    /// Displays the errors as a percentage of the value, e.g. `2 ± 5%`.
    Relative,
}

impl ErrorMode {
    /// Utility function to create a new [`FormatOptions`] with the same formating options as the
    /// given [`FormatOptions`], but with the error mode set to this value.
    pub fn inside(self, options: FormatOptions) -> FormatOptions {
        FormatOptions {
            errors: self,
            ..options
        }
    }
}

/// Helper struct to build a [`FormatOptions`] struct.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptionsBuilder(FormatOptions);

impl FormatOptionsBuilder {
    /// Creates a new builder with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error mode. See [`ErrorMode`] for more information.
    pub fn errors(mut self, errors: ErrorMode) -> Self {
        self.0.errors = errors;
        self
    }

    /// Sets the number of decimals. See [`FormatOptions::decimals`] for more information.
    pub fn decimals(mut self, decimals: Option<usize>) -> Self {
        self.0.decimals = decimals;
        self
    }

    /// Builds the [`FormatOptions`] struct.
    pub fn build(self) -> FormatOptions {
        self.0
    }
}

/// Rounds `n` to the given number of decimals. Numbers that cannot be rounded without
/// overflowing are returned unchanged.
fn round(n: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(i32::MAX as usize) as i32);
    let rounded = (n * factor).round() / factor;
    if !rounded.is_finite() {
        n
    } else if rounded == 0.0 {
        // avoid printing `-0`
        0.0
    } else {
        rounded
    }
}

/// Formatter for a [`Quantity`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityFormatter<'a> {
    /// The quantity to format.
    pub quantity: &'a Quantity,

    /// The options to use when formatting.
    pub options: FormatOptions,
}

impl Display for QuantityFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let decimals = self.options.effective_decimals();
        let (errors, suffix) = match self.options.errors {
            ErrorMode::Absolute => (self.quantity.errors(), ""),
            ErrorMode::Relative => (self.quantity.relative_errors(), "%"),
        };

        write!(f, "{}", round(self.quantity.value(), decimals))?;
        for error in errors.into_iter().map(|error| round(error, decimals)) {
            // errors that are too small to show at this precision are dropped entirely, as are
            // the negative relative errors of negative values
            if error > 0.0 {
                write!(f, " ± {}{}", error, suffix)?;
            }
        }

        Ok(())
    }
}
