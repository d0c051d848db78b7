#![doc = include_str!("../README.md")]

pub mod accessor;
pub mod average;
pub mod derived;
pub mod error;
pub mod fmt;
pub mod list;
pub mod measured;
pub mod operand;
pub mod ops;
pub mod quantity;

pub use accessor::Measured;
pub use average::weighted_average;
pub use errprop_error::Error;
pub use measured::{MeasuredQuantity, DEFAULT_SIGMA_INTERVAL};
pub use operand::{Operand, Quantities};
pub use quantity::Quantity;
