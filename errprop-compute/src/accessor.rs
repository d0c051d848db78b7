//! Uniform access to the value and errors of numbers, quantities, and sequences of them.
//!
//! Plain numbers take part in propagation as quantities without error, so every accessor
//! accepts them too. The slice accessors return [`Array1`]s so that the results can be fed
//! straight into further array arithmetic.

use crate::quantity::Quantity;
use ndarray::Array1;

/// Anything with a value and (possibly zero) systematic and statistical errors.
pub trait Measured {
    /// The central value.
    fn value(&self) -> f64;

    /// The systematic error. Plain numbers have none.
    fn sys_error(&self) -> f64 {
        0.0
    }

    /// The statistical error. Plain numbers have none.
    fn stat_error(&self) -> f64 {
        0.0
    }

    /// The total error, `sys_error + stat_error`.
    fn total_error(&self) -> f64 {
        self.sys_error() + self.stat_error()
    }

    /// Copies the value and errors into a [`Quantity`].
    fn to_quantity(&self) -> Quantity {
        Quantity::new(self.value(), self.sys_error(), self.stat_error())
    }
}

impl Measured for f64 {
    fn value(&self) -> f64 {
        *self
    }
}

impl Measured for Quantity {
    fn value(&self) -> f64 {
        Quantity::value(self)
    }

    fn sys_error(&self) -> f64 {
        self.err_sys()
    }

    fn stat_error(&self) -> f64 {
        self.err_stat()
    }

    fn to_quantity(&self) -> Quantity {
        *self
    }
}

impl<T: Measured + ?Sized> Measured for &T {
    fn value(&self) -> f64 {
        (**self).value()
    }

    fn sys_error(&self) -> f64 {
        (**self).sys_error()
    }

    fn stat_error(&self) -> f64 {
        (**self).stat_error()
    }

    fn total_error(&self) -> f64 {
        (**self).total_error()
    }

    fn to_quantity(&self) -> Quantity {
        (**self).to_quantity()
    }
}

/// Returns the value of each item.
pub fn values<M: Measured>(items: &[M]) -> Array1<f64> {
    items.iter().map(Measured::value).collect()
}

/// Returns the systematic error of each item.
pub fn sys_errors<M: Measured>(items: &[M]) -> Array1<f64> {
    items.iter().map(Measured::sys_error).collect()
}

/// Returns the statistical error of each item.
pub fn stat_errors<M: Measured>(items: &[M]) -> Array1<f64> {
    items.iter().map(Measured::stat_error).collect()
}

/// Returns the total error of each item, i.e. `sys_errors(items) + stat_errors(items)`.
pub fn total_errors<M: Measured>(items: &[M]) -> Array1<f64> {
    stat_errors(items) + sys_errors(items)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn plain_number() {
        assert_eq!(4.5f64.value(), 4.5);
        assert_eq!(4.5f64.sys_error(), 0.0);
        assert_eq!(4.5f64.stat_error(), 0.0);
        assert_eq!(4.5f64.to_quantity(), Quantity::exact(4.5));
    }

    #[test]
    fn single_quantity() {
        let q = Quantity::new(2.0, 0.1, 0.25);
        assert_eq!(Measured::value(&q), 2.0);
        assert_eq!(q.sys_error(), 0.1);
        assert_eq!(q.stat_error(), 0.25);
        assert_relative_eq!(q.total_error(), 0.35);
    }

    #[test]
    fn through_reference() {
        let q = Quantity::new(2.0, 0.5, 0.25);
        let r = &&q;
        assert_eq!(r.total_error(), 0.75);
        assert_eq!(r.to_quantity(), q);
    }

    #[test]
    fn elementwise() {
        let qs = [Quantity::new(1.0, 0.1, 0.5), Quantity::new(2.0, 0.0, 0.25)];
        assert_eq!(values(&qs), array![1.0, 2.0]);
        assert_eq!(sys_errors(&qs), array![0.1, 0.0]);
        assert_eq!(stat_errors(&qs), array![0.5, 0.25]);

        let total = total_errors(&qs);
        assert_relative_eq!(total[0], 0.6);
        assert_relative_eq!(total[1], 0.25);
    }

    #[test]
    fn elementwise_numbers() {
        let xs = [1.0f64, -3.0];
        assert_eq!(values(&xs), array![1.0, -3.0]);
        assert_eq!(total_errors(&xs), array![0.0, 0.0]);
    }

    #[test]
    fn empty_slice() {
        let qs: [Quantity; 0] = [];
        assert!(values(&qs).is_empty());
    }
}
