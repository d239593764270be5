//! Multiplication with Johnson's heap algorithm.
//!
//! The product terms `a_i * b_j` are generated lazily: the heap holds at most one
//! pair per term of the shorter operand, and `hind[i]` records which pair of row `i`
//! is next. `hind[i] = 2 * j + 1` means that row `i` has no pair in the heap and
//! `(i, j)` is the next one, `hind[i] = 2 * (j + 1)` means that `(i, j)` is in the heap.

use std::mem;
use std::ops::{Mul, MulAssign};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{instrument, trace};

use crate::domains::integer::Integer;

use super::accumulator::Accumulator;
use super::context::{CoefficientPath, PolynomialContext};
use super::heap::ChainedHeap;
use super::polynomial::MultivariatePolynomial;

/// The coefficients as machine words, if all of them fit.
pub(crate) fn small_coefficients(p: &MultivariatePolynomial) -> Option<Vec<i64>> {
    p.coefficients.iter().map(|c| c.to_i64()).collect()
}

impl MultivariatePolynomial {
    /// Multiply by the monomial `coeff * key`. Multiplying every key by the same
    /// key keeps the order intact.
    pub(crate) fn mul_monomial(&self, coeff: &Integer, key: &Integer) -> Self {
        let mut res = self.zero_with_capacity(self.nterms());
        for (c, k) in self.coefficients.iter().zip(&self.keys) {
            res.coefficients.push(c * coeff);
            res.keys.push(k * key);
        }
        res
    }

    /// Multiply two polynomials with Johnson's algorithm.
    pub fn heap_mul(&self, other: &Self) -> Self {
        self.check_context(other);

        if self.is_zero() || other.is_zero() {
            return self.zero();
        }

        // the heap is bounded by the length of the first operand
        let (a, b) = if self.nterms() <= other.nterms() {
            (self, other)
        } else {
            (other, self)
        };

        if a.nterms() == 1 {
            return b.mul_monomial(&a.coefficients[0], &a.keys[0]);
        }

        if self.ctx.coefficient_path() == CoefficientPath::Auto {
            if let (Some(ac), Some(bc)) = (small_coefficients(a), small_coefficients(b)) {
                trace!(
                    "Heap multiplication of {} by {} terms in word arithmetic",
                    a.nterms(),
                    b.nterms()
                );

                let mut acc = Accumulator::new();
                return a.johnson_mul(b, |store| {
                    acc.reset();
                    for (i, j) in store {
                        acc.add_mul(ac[*i], bc[*j]);
                    }
                    acc.to_integer()
                });
            }
        }

        trace!(
            "Heap multiplication of {} by {} terms in multi-precision arithmetic",
            a.nterms(),
            b.nterms()
        );

        a.johnson_mul(b, |store| {
            let mut c = Integer::zero();
            for (i, j) in store {
                c.add_mul_assign(&a.coefficients[*i], &b.coefficients[*j]);
            }
            c
        })
    }

    /// The core of Johnson's algorithm. `coefficient` sums the products of the
    /// coefficients of all pairs that contribute to the same output key.
    fn johnson_mul<C>(&self, other: &Self, mut coefficient: C) -> Self
    where
        C: FnMut(&[(usize, usize)]) -> Integer,
    {
        let (len_a, len_b) = (self.nterms(), other.nterms());
        let mut res = self.zero_with_capacity(len_a.max(len_b));

        let mut heap = ChainedHeap::with_capacity(len_a + 1);
        let mut hind = vec![1usize; len_a];
        let mut store: Vec<(usize, usize)> = Vec::with_capacity(len_a);

        hind[0] = 2;
        heap.insert(&self.keys[0] * &other.keys[0], (0, 0));

        while let Some((key, chain)) = heap.pop_root() {
            store.extend(chain);
            while heap.peek_key() == Some(&key) {
                if let Some((_, chain)) = heap.pop_root() {
                    store.extend(chain);
                }
            }

            for (i, _) in &store {
                hind[*i] |= 1;
            }

            let c = coefficient(&store);

            while let Some((i, j)) = store.pop() {
                // go right
                if i + 1 < len_a && hind[i + 1] == 2 * j + 1 {
                    hind[i + 1] = 2 * (j + 1);
                    heap.insert(&self.keys[i + 1] * &other.keys[j], (i + 1, j));
                }

                // go up
                if j + 1 < len_b
                    && hind[i] & 1 == 1
                    && (i == 0 || hind[i - 1] >= 2 * (j + 2) + 1)
                {
                    hind[i] = 2 * (j + 2);
                    heap.insert(&self.keys[i] * &other.keys[j + 1], (i, j + 1));
                }
            }

            if !c.is_zero() {
                res.append_term(c, key);
            }
        }

        res
    }

    /// Set `out` to `a * b`.
    pub fn mul_into(out: &mut Self, a: &Self, b: &Self) {
        let mut tmp = a.heap_mul(b);
        mem::swap(out, &mut tmp);
    }

    /// Set `self` to `self * other`. The product is computed into a temporary.
    pub fn mul_assign(&mut self, other: &Self) {
        let mut tmp = self.heap_mul(other);
        trace!("Swapping product of {} terms into result", tmp.nterms());
        mem::swap(self, &mut tmp);
    }

    /// Raise to the power `pow` with repeated squaring.
    ///
    /// Panics when `self` is a constant other than `0`, `1` or `-1` and `pow`
    /// does not fit in a `u32`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return Self::one(&self.ctx);
        }

        if self.is_zero() {
            return self.zero();
        }

        if self.is_constant() {
            let c = self.lcoeff();
            if c.abs().is_one() {
                let c = if pow % 2 == 0 { Integer::one() } else { c };
                return Self::constant(&self.ctx, c);
            }

            let Ok(e) = u32::try_from(pow) else {
                panic!("Exponent {} is too large for the constant {}", pow, c);
            };
            return Self::constant(&self.ctx, c.pow(e));
        }

        let mut x = self.clone();
        let mut y = Self::one(&self.ctx);
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    fn product(ctx: &Arc<PolynomialContext>, factors: &[Self]) -> Self {
        match factors.split_first() {
            None => Self::one(ctx),
            Some((first, rest)) => {
                let mut p = first.clone();
                for f in rest {
                    p.mul_assign(f);
                }
                p
            }
        }
    }

    /// Compute the sum over `groups` of the product of the polynomials in each group.
    #[instrument(level = "debug", skip_all)]
    pub fn addmul_multi(ctx: &Arc<PolynomialContext>, groups: &[Vec<Self>]) -> Self {
        let mut res = Self::new(ctx);
        for g in groups {
            res += &Self::product(ctx, g);
        }
        res
    }

    /// Compute the same sum as [Self::addmul_multi], with the products of the
    /// groups computed in parallel. The products are merged once all of them are done.
    #[instrument(level = "debug", skip_all)]
    pub fn addmul_multi_threaded(ctx: &Arc<PolynomialContext>, groups: &[Vec<Self>]) -> Self {
        let mut terms: Vec<Self> = groups
            .par_iter()
            .map(|g| Self::product(ctx, g))
            .collect();

        trace!("Merging {} products", terms.len());

        while terms.len() > 1 {
            let mut merged = Vec::with_capacity((terms.len() + 1) / 2);
            let mut it = terms.into_iter();
            while let Some(a) = it.next() {
                merged.push(match it.next() {
                    Some(b) => a + &b,
                    None => a,
                });
            }
            terms = merged;
        }

        terms.pop().unwrap_or_else(|| Self::new(ctx))
    }
}

impl<'a, 'b> Mul<&'a MultivariatePolynomial> for &'b MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial) -> Self::Output {
        self.heap_mul(rhs)
    }
}

impl<'a> Mul<&'a MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    #[inline]
    fn mul(self, rhs: &'a MultivariatePolynomial) -> Self::Output {
        (&self) * rhs
    }
}

impl<'a> MulAssign<&'a MultivariatePolynomial> for MultivariatePolynomial {
    #[inline]
    fn mul_assign(&mut self, rhs: &'a MultivariatePolynomial) {
        MultivariatePolynomial::mul_assign(self, rhs);
    }
}
