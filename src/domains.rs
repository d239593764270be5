//! Coefficient and key domains.
//!
//! Both the coefficients of a polynomial and its monomial keys are [Integer](integer::Integer)s,
//! which store small values inline and switch to multi-precision storage when needed.
pub mod integer;
