//! Sparse multivariate polynomials over the integers.
//!
//! A [PolynomialContext](context::PolynomialContext) fixes the number of variables and
//! the prime assigned to each of them. All polynomials created from the same context
//! can be combined with each other.
pub mod accumulator;
pub mod context;
pub mod division;
pub mod heap;
pub mod monomial;
pub mod mul;
pub mod polynomial;

#[cfg(test)]
mod proptests;

/// The number of exponents that are stored inline when decoding a monomial key.
pub const INLINED_EXPONENTS: usize = 6;

pub use context::{CoefficientPath, PolynomialContext, VariableOrder};
pub use polynomial::MultivariatePolynomial;
