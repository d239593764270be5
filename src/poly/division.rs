//! Division with the Monagan–Pearce heap algorithm.
//!
//! The heap yields the terms of `f - q * g` in descending order while the quotient
//! `q` is being built. Row `i` of the heap holds the products `g_i * q_j`; row `0`
//! is never needed, since `g_0 * q_j` cancels the term that produced `q_j`. The
//! dividend enters the heap as a separate producer that walks over its terms.
//!
//! Quotient coefficients are obtained by floor division by the leading coefficient
//! of the divisor. Whatever is left over at a key becomes a remainder term.

use std::mem;
use std::ops::{Div, Rem};

use tracing::{debug, trace};

use crate::domains::integer::{floor_div_rem_i128, Integer};

use super::accumulator::Accumulator;
use super::context::CoefficientPath;
use super::heap::ChainedHeap;
use super::monomial::divide_key;
use super::mul::small_coefficients;
use super::polynomial::MultivariatePolynomial;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Producer {
    /// Term `j` of the dividend.
    Dividend(usize),
    /// Term `i` of the divisor times term `j` of the quotient.
    Product(usize, usize),
}

/// The number of bits needed to represent `n`.
#[inline]
fn bit_count(n: usize) -> u32 {
    usize::BITS - n.leading_zeros()
}

#[inline]
fn max_bits(p: &MultivariatePolynomial) -> u32 {
    p.coefficients.iter().map(|c| c.bits()).max().unwrap_or(0)
}

impl MultivariatePolynomial {
    /// Divide `self` by `div` with the Monagan–Pearce algorithm and return the
    /// quotient and, if `with_remainder` is set, the remainder. Without a remainder
    /// the algorithm stops as soon as no further quotient terms are possible.
    fn monagan_pearce(&self, div: &Self, with_remainder: bool) -> (Self, Self) {
        self.check_context(div);

        if div.is_zero() {
            panic!("Cannot divide by the zero polynomial");
        }

        if self.is_zero() {
            return (self.zero(), self.zero());
        }

        let lead_key = &div.keys[0];
        let lead_coeff = &div.coefficients[0];

        if self.keys[0] < *lead_key {
            let r = if with_remainder {
                self.clone()
            } else {
                self.zero()
            };
            return (self.zero(), r);
        }

        let (len_f, len_g) = (self.nterms(), div.nterms());

        // word arithmetic is used until a quotient coefficient does not fit in a word
        let mut small_div = None;
        if self.ctx.coefficient_path() == CoefficientPath::Auto {
            let bits_g = max_bits(div);
            let bits_f = max_bits(self);
            if bits_g <= 62 && bits_f <= bits_g + bit_count(len_g) + 62 {
                small_div = small_coefficients(div);
            }
        }
        let mut small_q: Vec<i64> = Vec::new();

        trace!(
            "Heap division of {} by {} terms, word arithmetic: {}",
            len_f,
            len_g,
            small_div.is_some()
        );

        let mut q = self.zero_with_capacity(len_f);
        let mut r = self.zero();

        let mut heap = ChainedHeap::with_capacity(len_g + 1);
        let mut hind = vec![1usize; len_g];
        let mut store: Vec<Producer> = Vec::with_capacity(len_g + 1);
        let mut acc = Accumulator::new();

        // the number of rows that wait for the next quotient term, plus one
        let mut s = len_g;

        heap.insert(self.keys[0].clone(), Producer::Dividend(0));

        while let Some((exp, chain)) = heap.pop_root() {
            if !with_remainder && exp < *lead_key {
                break;
            }

            store.extend(chain);
            while heap.peek_key() == Some(&exp) {
                if let Some((_, chain)) = heap.pop_root() {
                    store.extend(chain);
                }
            }

            for p in &store {
                if let Producer::Product(i, _) = p {
                    hind[*i] |= 1;
                }
            }

            let quotient_key = divide_key(&exp, lead_key);
            let need_coeff = with_remainder || quotient_key.is_some();

            let mut big_coeff = None;
            if need_coeff {
                if let Some(gc) = &small_div {
                    acc.reset();
                    for p in &store {
                        match p {
                            Producer::Dividend(j) => acc.add_integer(&self.coefficients[*j]),
                            Producer::Product(i, j) => acc.sub_mul(gc[*i], small_q[*j]),
                        }
                    }
                } else {
                    let mut c = Integer::zero();
                    for p in &store {
                        match p {
                            Producer::Dividend(j) => c += &self.coefficients[*j],
                            Producer::Product(i, j) => {
                                c.sub_mul_assign(&div.coefficients[*i], &q.coefficients[*j])
                            }
                        }
                    }
                    big_coeff = Some(c);
                }
            }

            while let Some(p) = store.pop() {
                match p {
                    Producer::Dividend(j) => {
                        if j + 1 < len_f {
                            heap.insert(self.keys[j + 1].clone(), Producer::Dividend(j + 1));
                        }
                    }
                    Producer::Product(i, j) => {
                        // go right
                        if i + 1 < len_g && hind[i + 1] == 2 * j + 1 {
                            hind[i + 1] = 2 * (j + 1);
                            heap.insert(&div.keys[i + 1] * &q.keys[j], Producer::Product(i + 1, j));
                        }

                        // go up
                        if j + 1 == q.nterms() {
                            s += 1;
                        } else if hind[i] & 1 == 1 && (i == 1 || hind[i - 1] >= 2 * (j + 2) + 1)
                        {
                            hind[i] = 2 * (j + 2);
                            heap.insert(&div.keys[i] * &q.keys[j + 1], Producer::Product(i, j + 1));
                        }
                    }
                }
            }

            if !need_coeff {
                continue;
            }

            let Some(qk) = quotient_key else {
                let c = big_coeff.unwrap_or_else(|| acc.to_integer());
                if !c.is_zero() {
                    r.append_term(c, exp);
                }
                continue;
            };

            let (qc, rc) = match big_coeff {
                Some(c) => c.quot_rem_floor(lead_coeff),
                None => {
                    let floor = acc
                        .to_i128()
                        .zip(lead_coeff.to_i128())
                        .and_then(|(a, lc)| floor_div_rem_i128(a, lc));

                    if let Some((qq, rr)) = floor {
                        (Integer::from_double(qq), Integer::from_double(rr))
                    } else {
                        let c = acc.to_integer();
                        debug!(
                            "Accumulated coefficient {} does not fit in two words: switching to multi-precision arithmetic",
                            c
                        );
                        small_div = None;
                        c.quot_rem_floor(lead_coeff)
                    }
                }
            };

            if with_remainder && !rc.is_zero() {
                r.append_term(rc, exp);
            }

            if qc.is_zero() {
                continue;
            }

            if small_div.is_some() {
                if let Some(v) = qc.to_i64() {
                    small_q.push(v);
                } else {
                    debug!(
                        "Quotient coefficient {} does not fit in a word: switching to multi-precision arithmetic",
                        qc
                    );
                    small_div = None;
                }
            }

            if s > 1 {
                hind[1] = 2 * (q.nterms() + 1);
                heap.insert(&div.keys[1] * &qk, Producer::Product(1, q.nterms()));
            }
            s = 1;

            q.append_term(qc, qk);
        }

        (q, r)
    }

    /// Compute the quotient of the division of `self` by `div`, with floor
    /// division on the leading coefficient of `div`.
    ///
    /// Panics when `div` is zero.
    pub fn quotient(&self, div: &Self) -> Self {
        self.monagan_pearce(div, false).0
    }

    /// Compute the quotient and remainder of the division of `self` by `div`,
    /// such that `self = q * div + r`.
    ///
    /// Every term of `r` either has a monomial that is not divisible by the
    /// leading monomial of `div`, or a coefficient in `[0, lc)` for a positive
    /// leading coefficient `lc` (`(lc, 0]` for a negative one).
    ///
    /// Panics when `div` is zero.
    pub fn div_rem(&self, div: &Self) -> (Self, Self) {
        self.monagan_pearce(div, true)
    }

    /// Set `q` to the quotient of `a` by `b`.
    pub fn div_into(q: &mut Self, a: &Self, b: &Self) {
        let mut tmp = a.quotient(b);
        mem::swap(q, &mut tmp);
    }

    /// Set `self` to the quotient of `self` by `div`.
    pub fn div_assign(&mut self, div: &Self) {
        let mut tmp = self.quotient(div);
        trace!("Swapping quotient of {} terms into result", tmp.nterms());
        mem::swap(self, &mut tmp);
    }

    /// Set `self` to the quotient of `a` by `self`.
    pub fn rdiv_assign(&mut self, a: &Self) {
        let mut tmp = a.quotient(self);
        trace!("Swapping quotient of {} terms into divisor", tmp.nterms());
        mem::swap(self, &mut tmp);
    }

    /// Set `q` and `r` to the quotient and remainder of `a` by `b`.
    pub fn div_rem_into(q: &mut Self, r: &mut Self, a: &Self, b: &Self) {
        let (mut qq, mut rr) = a.div_rem(b);
        mem::swap(q, &mut qq);
        mem::swap(r, &mut rr);
    }

    /// Set `self` to the quotient of `self` by `div` and return the remainder.
    pub fn div_rem_assign(&mut self, div: &Self) -> Self {
        let (mut q, r) = self.div_rem(div);
        mem::swap(self, &mut q);
        r
    }
}

impl<'a, 'b> Div<&'a MultivariatePolynomial> for &'b MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn div(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.quotient(other)
    }
}

impl<'a> Div<&'a MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn div(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.quotient(other)
    }
}

impl<'a, 'b> Rem<&'a MultivariatePolynomial> for &'b MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn rem(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.div_rem(other).1
    }
}

impl<'a> Rem<&'a MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn rem(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.div_rem(other).1
    }
}
