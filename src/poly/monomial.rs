//! Monomial keys.
//!
//! The key of the exponent vector `e` is `p_0^e_0 * ... * p_{n-1}^e_{n-1}`, where
//! `p_i` is the prime that the context assigns to variable `i`. The product of two
//! keys is the key of the summed exponent vectors, and a key divides another one
//! exactly when the corresponding monomial divides the other monomial.
//! Larger keys come first in a polynomial.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::domains::integer::Integer;

use super::context::PolynomialContext;
use super::INLINED_EXPONENTS;

pub type Exponents = SmallVec<[u32; INLINED_EXPONENTS]>;

impl PolynomialContext {
    /// Encode an exponent vector as a monomial key.
    pub fn encode(&self, exponents: &[u32]) -> Integer {
        if exponents.len() != self.nvars() {
            panic!(
                "Exponent vector has length {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        let mut key = Integer::one();
        for (p, e) in self.primes().iter().zip(exponents) {
            if *e > 0 {
                key *= p.pow(*e);
            }
        }
        key
    }

    /// Decode a monomial key into its exponent vector.
    ///
    /// Panics when `key` is not a product of the primes of this context.
    pub fn decode(&self, key: &Integer) -> Exponents {
        if key.signum() <= 0 {
            malformed_key(key);
        }

        let mut rest = key.clone();
        let mut exponents = SmallVec::with_capacity(self.nvars());
        for p in self.primes() {
            if rest.is_one() {
                exponents.push(0);
            } else {
                exponents.push(rest.remove_factor(p));
            }
        }

        if !rest.is_one() {
            malformed_key(key);
        }

        exponents
    }

    /// The exponent of variable `var` in the monomial with key `key`.
    ///
    /// Panics on a key that is not a product of the context primes.
    pub fn degree(&self, key: &Integer, var: usize) -> u32 {
        self.check_var(var);
        self.decode(key)[var]
    }

    /// Compare two monomial keys in the monomial order of this context.
    #[inline]
    pub fn compare(&self, a: &Integer, b: &Integer) -> Ordering {
        a.cmp(b)
    }
}

#[cold]
fn malformed_key(key: &Integer) -> ! {
    panic!(
        "Malformed monomial key {}: not a product of the context primes",
        key
    )
}

/// Divide the key `a` by `b` if the monomial of `b` divides the monomial of `a`.
#[inline]
pub fn divide_key(a: &Integer, b: &Integer) -> Option<Integer> {
    if b.is_one() {
        return Some(a.clone());
    }
    a.checked_div_exact(b)
}
