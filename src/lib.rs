//! Exact rational and IEEE-754-aware complex number value types.
//!
//! Both types are immutable `Copy` values: every operation returns a new
//! value, so shared instances can be used from any number of threads
//! without coordination.

mod complex;
mod rational;

pub use complex::{Complex, Complex32, Complex64};
pub use rational::{Rational, Rational32, Rational64, RationalBase, RationalError};
