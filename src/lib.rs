//! Exact arithmetic on sparse multivariate polynomials with integer coefficients.
//!
//! Every monomial is encoded as a single integer key: each variable is assigned a
//! distinct prime and the exponent vector `(e_0, ..., e_{n-1})` maps to `p_0^e_0 * ... * p_{n-1}^e_{n-1}`.
//! Multiplying monomials is multiplying keys, and keys are ordered as integers.
//! Polynomials are stored as key-descending term lists and multiplied and divided
//! with heap-based algorithms that generate the output one term at a time.
//!
//! For example:
//!
//! ```
//! use primepoly::poly::{context::PolynomialContext, polynomial::MultivariatePolynomial};
//!
//! let ctx = PolynomialContext::new(1);
//! let x = MultivariatePolynomial::gen(&ctx, 0);
//! let one = MultivariatePolynomial::one(&ctx);
//!
//! let f = &(&x * &x) - &one;
//! let g = &x - &one;
//! let (q, r) = f.div_rem(&g);
//! assert_eq!(q, &x + &one);
//! assert!(r.is_zero());
//! ```

pub mod domains;
pub mod poly;
