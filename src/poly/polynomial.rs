use std::cmp::Ordering;
use std::fmt::Display;
use std::mem;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

use ahash::HashMap;

use crate::domains::integer::Integer;

use super::context::PolynomialContext;
use super::monomial::Exponents;

/// A sparse multivariate polynomial with integer coefficients.
///
/// Terms are stored as `(coefficient, key)` pairs, where the key encodes the
/// exponent vector of the term, see [PolynomialContext::encode]. Every polynomial
/// handed out by this crate is canonical: the keys are strictly decreasing and
/// no coefficient is zero. The first term is the leading term.
#[derive(Clone)]
pub struct MultivariatePolynomial {
    pub(crate) coefficients: Vec<Integer>,
    pub(crate) keys: Vec<Integer>,
    pub(crate) ctx: Arc<PolynomialContext>,
}

impl MultivariatePolynomial {
    /// Constructs a zero polynomial in the context `ctx`.
    #[inline]
    pub fn new(ctx: &Arc<PolynomialContext>) -> Self {
        Self {
            coefficients: Vec::new(),
            keys: Vec::new(),
            ctx: ctx.clone(),
        }
    }

    #[inline]
    pub fn with_capacity(ctx: &Arc<PolynomialContext>, cap: usize) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap),
            keys: Vec::with_capacity(cap),
            ctx: ctx.clone(),
        }
    }

    /// Constructs a zero polynomial in the same context as `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self::new(&self.ctx)
    }

    /// Constructs a zero polynomial with space for `cap` terms in the same context as `self`.
    #[inline]
    pub fn zero_with_capacity(&self, cap: usize) -> Self {
        Self::with_capacity(&self.ctx, cap)
    }

    #[inline]
    pub fn one(ctx: &Arc<PolynomialContext>) -> Self {
        Self::constant(ctx, Integer::one())
    }

    /// Constructs a constant polynomial.
    #[inline]
    pub fn constant(ctx: &Arc<PolynomialContext>, coeff: Integer) -> Self {
        if coeff.is_zero() {
            return Self::new(ctx);
        }

        Self {
            coefficients: vec![coeff],
            keys: vec![Integer::one()],
            ctx: ctx.clone(),
        }
    }

    /// Constructs the polynomial `x_var`.
    pub fn gen(ctx: &Arc<PolynomialContext>, var: usize) -> Self {
        Self {
            coefficients: vec![Integer::one()],
            keys: vec![ctx.prime(var).clone()],
            ctx: ctx.clone(),
        }
    }

    /// Constructs a polynomial with a single term.
    pub fn monomial(ctx: &Arc<PolynomialContext>, coeff: Integer, exponents: &[u32]) -> Self {
        let key = ctx.encode(exponents);
        if coeff.is_zero() {
            return Self::new(ctx);
        }

        Self {
            coefficients: vec![coeff],
            keys: vec![key],
            ctx: ctx.clone(),
        }
    }

    /// Constructs a polynomial from terms in arbitrary order. Terms with equal
    /// exponents are added together.
    pub fn from_terms<I, E>(ctx: &Arc<PolynomialContext>, terms: I) -> Self
    where
        I: IntoIterator<Item = (Integer, E)>,
        E: AsRef<[u32]>,
    {
        let mut collected: HashMap<Integer, Integer> = HashMap::default();
        for (c, e) in terms {
            let key = ctx.encode(e.as_ref());
            if !c.is_zero() {
                *collected.entry(key).or_default() += c;
            }
        }

        let mut res = Self::with_capacity(ctx, collected.len());
        for (k, c) in collected {
            if !c.is_zero() {
                res.coefficients.push(c);
                res.keys.push(k);
            }
        }
        res.sort_terms();
        res
    }

    #[inline]
    pub fn context(&self) -> &Arc<PolynomialContext> {
        &self.ctx
    }

    #[inline]
    pub fn nvars(&self) -> usize {
        self.ctx.nvars()
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.coefficients.capacity().min(self.keys.capacity())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1 && self.coefficients[0].is_one() && self.keys[0].is_one()
    }

    /// Returns true if the polynomial is zero or a non-zero constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.is_zero() || self.nterms() == 1 && self.keys[0].is_one()
    }

    /// The coefficient of the leading term, or zero for the zero polynomial.
    #[inline]
    pub fn lcoeff(&self) -> Integer {
        self.coefficients.first().cloned().unwrap_or_default()
    }

    /// The key of the leading term.
    #[inline]
    pub fn lkey(&self) -> Option<&Integer> {
        self.keys.first()
    }

    #[inline]
    pub fn coefficients(&self) -> &[Integer] {
        &self.coefficients
    }

    #[inline]
    pub fn keys(&self) -> &[Integer] {
        &self.keys
    }

    /// Iterate over the `(key, coefficient)` pairs in storage order.
    /// Diagnostic only: a polynomial that is being built with [Self::push_term]
    /// may not be canonical.
    pub fn dump(&self) -> impl Iterator<Item = (&Integer, &Integer)> {
        self.keys.iter().zip(&self.coefficients)
    }

    #[inline]
    fn check_term(&self, index: usize) {
        if index >= self.nterms() {
            panic!(
                "Term index {} out of range for polynomial with {} terms",
                index,
                self.nterms()
            );
        }
    }

    #[inline]
    pub(crate) fn check_context(&self, other: &Self) {
        debug_assert!(
            self.ctx.is_compatible(&other.ctx),
            "Polynomials belong to different contexts"
        );
    }

    #[inline]
    pub fn term_coefficient(&self, index: usize) -> &Integer {
        self.check_term(index);
        &self.coefficients[index]
    }

    #[inline]
    pub fn term_key(&self, index: usize) -> &Integer {
        self.check_term(index);
        &self.keys[index]
    }

    pub fn term_exponents(&self, index: usize) -> Exponents {
        self.check_term(index);
        self.ctx.decode(&self.keys[index])
    }

    pub fn term_var_exponent(&self, index: usize, var: usize) -> u32 {
        self.check_term(index);
        self.ctx.degree(&self.keys[index], var)
    }

    /// The monomial of term `index` with coefficient one.
    pub fn term_monomial(&self, index: usize) -> Self {
        self.check_term(index);
        Self {
            coefficients: vec![Integer::one()],
            keys: vec![self.keys[index].clone()],
            ctx: self.ctx.clone(),
        }
    }

    /// Set the coefficient of term `index`. A zero coefficient removes the term.
    ///
    /// Removal shifts all later terms, which is linear in their number.
    pub fn set_term_coefficient(&mut self, index: usize, coeff: Integer) {
        self.check_term(index);
        if coeff.is_zero() {
            self.coefficients.remove(index);
            self.keys.remove(index);
        } else {
            self.coefficients[index] = coeff;
        }
    }

    /// Find the position of `key`, or the position where it should be inserted.
    #[inline]
    pub fn find_key(&self, key: &Integer) -> Result<usize, usize> {
        self.keys.binary_search_by(|k| key.cmp(k))
    }

    /// Find the term with the given exponents. If there is none, the error
    /// contains the index at which it would be inserted.
    pub fn monomial_exists(&self, exponents: &[u32]) -> Result<usize, usize> {
        self.find_key(&self.ctx.encode(exponents))
    }

    /// The coefficient of the monomial with the given exponents, which is zero
    /// when the monomial does not appear.
    pub fn get_coefficient(&self, exponents: &[u32]) -> Integer {
        match self.monomial_exists(exponents) {
            Ok(i) => self.coefficients[i].clone(),
            Err(_) => Integer::zero(),
        }
    }

    /// Set the coefficient of the monomial with the given exponents, inserting
    /// or removing a term if needed.
    ///
    /// Insertion and removal shift all later terms. Use [`Self::push_term`]
    /// followed by [`Self::sort_terms`] to build a polynomial from many terms.
    pub fn set_coefficient(&mut self, exponents: &[u32], coeff: Integer) {
        let key = self.ctx.encode(exponents);
        match self.find_key(&key) {
            Ok(i) => {
                if coeff.is_zero() {
                    self.coefficients.remove(i);
                    self.keys.remove(i);
                } else {
                    self.coefficients[i] = coeff;
                }
            }
            Err(i) => {
                if !coeff.is_zero() {
                    self.fit_capacity(self.nterms() + 1);
                    self.coefficients.insert(i, coeff);
                    self.keys.insert(i, key);
                }
            }
        }
    }

    /// Add `coeff` times the monomial to the polynomial.
    ///
    /// Like [`Self::set_coefficient`], a new or cancelled term shifts all later terms.
    pub fn append_monomial(&mut self, coeff: Integer, exponents: &[u32]) {
        if coeff.is_zero() {
            return;
        }

        let key = self.ctx.encode(exponents);
        match self.find_key(&key) {
            Ok(i) => {
                self.coefficients[i] += coeff;
                if self.coefficients[i].is_zero() {
                    self.coefficients.remove(i);
                    self.keys.remove(i);
                }
            }
            Err(i) => {
                self.fit_capacity(self.nterms() + 1);
                self.coefficients.insert(i, coeff);
                self.keys.insert(i, key);
            }
        }
    }

    /// Append a term to the back without keeping the polynomial canonical.
    /// Call [Self::sort_terms] and [Self::combine_like_terms] afterwards.
    pub fn push_term(&mut self, coeff: Integer, exponents: &[u32]) {
        let key = self.ctx.encode(exponents);
        self.fit_capacity(self.nterms() + 1);
        self.coefficients.push(coeff);
        self.keys.push(key);
    }

    /// Append a term that is known to come after all current terms.
    #[inline]
    pub(crate) fn append_term(&mut self, coeff: Integer, key: Integer) {
        debug_assert!(!coeff.is_zero());
        debug_assert!(self.keys.last().map(|k| *k > key).unwrap_or(true));
        self.coefficients.push(coeff);
        self.keys.push(key);
    }

    /// Ensure there is room for at least `n` terms. Storage grows at least geometrically.
    pub fn fit_capacity(&mut self, n: usize) {
        let cap = self.capacity();
        if n > cap {
            let target = n.max(2 * cap);
            self.coefficients
                .reserve_exact(target - self.coefficients.len());
            self.keys.reserve_exact(target - self.keys.len());
        }
    }

    /// Truncate to `n` terms, or extend with zero terms of key one. Extending
    /// breaks the canonical form until the new terms are overwritten.
    pub fn set_length(&mut self, n: usize) {
        if n <= self.nterms() {
            self.coefficients.truncate(n);
            self.keys.truncate(n);
        } else {
            self.fit_capacity(n);
            self.coefficients.resize(n, Integer::zero());
            self.keys.resize(n, Integer::one());
        }
    }

    /// Overwrite `self` with a copy of `other`, reusing the storage of `self`.
    #[inline]
    pub fn set(&mut self, other: &Self) {
        self.clone_from(other);
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Sort the terms by descending key. Terms with equal keys stay adjacent.
    pub fn sort_terms(&mut self) {
        let mut terms: Vec<_> = mem::take(&mut self.keys)
            .into_iter()
            .zip(mem::take(&mut self.coefficients))
            .collect();
        terms.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        (self.keys, self.coefficients) = terms.into_iter().unzip();
    }

    /// Add adjacent terms with equal keys and remove zero terms.
    pub fn combine_like_terms(&mut self) {
        let mut w = 0;
        for r in 0..self.nterms() {
            if w > 0 && self.keys[w - 1] == self.keys[r] {
                let c = mem::take(&mut self.coefficients[r]);
                self.coefficients[w - 1] += c;
            } else {
                if w > 0 && self.coefficients[w - 1].is_zero() {
                    w -= 1;
                }
                self.coefficients.swap(w, r);
                self.keys.swap(w, r);
                w += 1;
            }
        }

        if w > 0 && self.coefficients[w - 1].is_zero() {
            w -= 1;
        }
        self.set_length(w);
    }

    /// Check if the polynomial is sorted and has only non-zero coefficients
    pub fn check_consistency(&self) {
        assert_eq!(self.coefficients.len(), self.keys.len());

        for c in &self.coefficients {
            if c.is_zero() {
                panic!("Inconsistent polynomial (0 coefficient): {:?}", self);
            }
        }

        for t in 1..self.nterms() {
            match self.keys[t].cmp(&self.keys[t - 1]) {
                Ordering::Equal => panic!("Inconsistent polynomial (equal monomials): {:?}", self),
                Ordering::Greater => panic!(
                    "Inconsistent polynomial (wrong monomial ordering): {:?}",
                    self
                ),
                Ordering::Less => {}
            }
        }
    }

    /// The highest exponent of `var`, or `None` for the zero polynomial.
    pub fn degree(&self, var: usize) -> Option<u32> {
        self.ctx.check_var(var);
        self.keys.iter().map(|k| self.ctx.degree(k, var)).max()
    }

    /// The highest total degree of a term, or `None` for the zero polynomial.
    pub fn total_degree(&self) -> Option<u32> {
        self.keys
            .iter()
            .map(|k| self.ctx.decode(k).iter().sum())
            .max()
    }

    /// Compare two monomials with coefficient one.
    pub fn cmp_monomials(a: &Self, b: &Self) -> Ordering {
        if !(a.nterms() == 1 && a.coefficients[0].is_one())
            || !(b.nterms() == 1 && b.coefficients[0].is_one())
        {
            panic!("Can only compare monomials with coefficient one");
        }
        a.check_context(b);

        a.ctx.compare(&a.keys[0], &b.keys[0])
    }

    /// Add a constant to the polynomial.
    pub fn add_constant(mut self, c: &Integer) -> Self {
        self.add_constant_assign(c);
        self
    }

    pub fn sub_constant(mut self, c: &Integer) -> Self {
        self.add_constant_assign(&-c);
        self
    }

    fn add_constant_assign(&mut self, c: &Integer) {
        if c.is_zero() {
            return;
        }

        // the constant term has key one and is therefore last
        let n = self.nterms();
        if n > 0 && self.keys[n - 1].is_one() {
            self.coefficients[n - 1] += c;
            if self.coefficients[n - 1].is_zero() {
                self.set_length(n - 1);
            }
        } else {
            self.fit_capacity(n + 1);
            self.coefficients.push(c.clone());
            self.keys.push(Integer::one());
        }
    }

    /// Multiply every coefficient by `c`.
    pub fn mul_scalar(mut self, c: &Integer) -> Self {
        if c.is_zero() {
            return self.zero();
        }

        for x in &mut self.coefficients {
            *x *= c;
        }
        self
    }

    /// Substitute `values[i]` for variable `i`.
    pub fn evaluate(&self, values: &[Integer]) -> Integer {
        assert_eq!(
            values.len(),
            self.nvars(),
            "Expected one value per variable"
        );

        let mut res = Integer::zero();
        for (c, k) in self.coefficients.iter().zip(&self.keys) {
            let mut t = c.clone();
            for (v, e) in values.iter().zip(self.ctx.decode(k)) {
                if e > 0 {
                    t *= v.pow(e);
                }
            }
            res += t;
        }
        res
    }

    /// Merge the terms of `other` into `self`, subtracting them if `subtract` is set.
    fn merge(mut self, other: &Self, subtract: bool) -> Self {
        self.check_context(other);

        if other.is_zero() {
            return self;
        }

        let n = self.nterms() + other.nterms();
        let mut coefficients = Vec::with_capacity(n);
        let mut keys = Vec::with_capacity(n);
        let mut i = 0;
        let mut j = 0;

        macro_rules! take_self {
            () => {
                coefficients.push(mem::take(&mut self.coefficients[i]));
                keys.push(mem::take(&mut self.keys[i]));
                i += 1;
            };
        }

        macro_rules! copy_other {
            () => {
                if subtract {
                    coefficients.push(-&other.coefficients[j]);
                } else {
                    coefficients.push(other.coefficients[j].clone());
                }
                keys.push(other.keys[j].clone());
                j += 1;
            };
        }

        while i < self.nterms() && j < other.nterms() {
            match self.keys[i].cmp(&other.keys[j]) {
                Ordering::Greater => {
                    take_self!();
                }
                Ordering::Less => {
                    copy_other!();
                }
                Ordering::Equal => {
                    let mut c = mem::take(&mut self.coefficients[i]);
                    if subtract {
                        c -= &other.coefficients[j];
                    } else {
                        c += &other.coefficients[j];
                    }

                    if !c.is_zero() {
                        coefficients.push(c);
                        keys.push(mem::take(&mut self.keys[i]));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        while i < self.nterms() {
            take_self!();
        }

        while j < other.nterms() {
            copy_other!();
        }

        self.coefficients = coefficients;
        self.keys = keys;
        self
    }
}

impl std::fmt::Debug for MultivariatePolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for (key, coeff) in self.dump() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?}, {:?} }}", coeff, &self.ctx.decode(key)[..])?;
        }
        write!(f, " ]")
    }
}

impl Display for MultivariatePolynomial {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (t, (key, coeff)) in self.dump().enumerate() {
            let exponents = self.ctx.decode(key);
            let is_constant = exponents.iter().all(|e| *e == 0);

            if coeff.is_negative() {
                write!(f, "-")?;
            } else if t > 0 {
                write!(f, "+")?;
            }

            let abs = coeff.abs();
            let mut first = true;
            if !abs.is_one() || is_constant {
                write!(f, "{}", abs)?;
                first = false;
            }

            for (v, e) in exponents.iter().enumerate() {
                if *e == 0 {
                    continue;
                }
                if !first {
                    write!(f, "*")?;
                }
                first = false;

                if *e == 1 {
                    write!(f, "x{}", v)?;
                } else {
                    write!(f, "x{}^{}", v, e)?;
                }
            }
        }

        Ok(())
    }
}

impl PartialEq for MultivariatePolynomial {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }

        if !self.ctx.is_compatible(&other.ctx) || self.nterms() != other.nterms() {
            return false;
        }

        self.keys == other.keys && self.coefficients == other.coefficients
    }
}

impl Eq for MultivariatePolynomial {}

impl<'a> Add<&'a MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn add(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.merge(other, false)
    }
}

impl<'a, 'b> Add<&'a MultivariatePolynomial> for &'b MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn add(self, other: &'a MultivariatePolynomial) -> Self::Output {
        if self.nterms() < other.nterms() {
            other.clone().merge(self, false)
        } else {
            self.clone().merge(other, false)
        }
    }
}

impl<'a> Sub<&'a MultivariatePolynomial> for MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn sub(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.merge(other, true)
    }
}

impl<'a, 'b> Sub<&'a MultivariatePolynomial> for &'b MultivariatePolynomial {
    type Output = MultivariatePolynomial;

    fn sub(self, other: &'a MultivariatePolynomial) -> Self::Output {
        self.clone().merge(other, true)
    }
}

impl<'a> AddAssign<&'a MultivariatePolynomial> for MultivariatePolynomial {
    fn add_assign(&mut self, other: &'a MultivariatePolynomial) {
        let s = mem::replace(self, other.zero());
        *self = s.merge(other, false);
    }
}

impl<'a> SubAssign<&'a MultivariatePolynomial> for MultivariatePolynomial {
    fn sub_assign(&mut self, other: &'a MultivariatePolynomial) {
        let s = mem::replace(self, other.zero());
        *self = s.merge(other, true);
    }
}

impl Neg for MultivariatePolynomial {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = -mem::take(c);
        }
        self
    }
}

impl<'a> Neg for &'a MultivariatePolynomial {
    type Output = MultivariatePolynomial;
    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}
